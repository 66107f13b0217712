mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{auth, completions, contacts, import, sync, Context};
use crate::error::{exit_code_for, report_error};
use rolo_config as config;
use rolo_store::{paths, Store};

#[derive(Debug, Parser)]
#[command(name = "rolo", version, about = "rolo CLI")]
pub struct Cli {
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add a single contact by hand
    Add(contacts::AddArgs),
    /// Bulk-import contacts from a spreadsheet
    Import(import::ImportArgs),
    List(contacts::ListArgs),
    /// List previously imported files
    Files(import::FilesArgs),
    /// Clear the current partition of the local cache
    Clear(contacts::ClearArgs),
    /// Push cached contacts that never reached the remote tables
    Sync(sync::SyncArgs),
    Signup(auth::SignupArgs),
    Login(auth::LoginArgs),
    Logout(auth::LogoutArgs),
    Whoami(auth::WhoamiArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        db_path,
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    match command {
        Command::Completions(args) => completions::emit(args),
        command => {
            let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
            if verbose {
                match config::resolve_config_path(config_path.clone()) {
                    Ok(path) => {
                        if path.exists() {
                            debug!(path = %path.display(), "config resolved");
                        } else {
                            debug!(path = %path.display(), "config missing, using defaults");
                        }
                    }
                    Err(err) => {
                        debug!(error = %err, "config unavailable");
                    }
                }
            }
            let db_path =
                paths::resolve_db_path(db_path).with_context(|| "resolve database path")?;

            if verbose {
                debug!(path = %db_path.display(), "database path resolved");
            }

            let store = Store::open(&db_path)
                .with_context(|| format!("open database {}", db_path.display()))?;
            store.migrate().with_context(|| "run migrations")?;

            let ctx = Context {
                store: &store,
                json,
                config: &app_config,
            };

            match command {
                Command::Add(args) => contacts::add_contact(&ctx, args),
                Command::Import(args) => import::import_file(&ctx, args),
                Command::List(args) => contacts::list_contacts(&ctx, args),
                Command::Files(args) => import::list_files(&ctx, args),
                Command::Clear(args) => contacts::clear_contacts(&ctx, args),
                Command::Sync(args) => sync::sync_pending(&ctx, args),
                Command::Signup(args) => auth::signup(&ctx, args),
                Command::Login(args) => auth::login(&ctx, args),
                Command::Logout(args) => auth::logout(&ctx, args),
                Command::Whoami(args) => auth::whoami(&ctx, args),
                Command::Completions(_) => {
                    unreachable!("completions command handled before store initialization")
                }
            }
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init();
}
