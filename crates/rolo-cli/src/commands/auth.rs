use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use anyhow::Result;
use clap::Args;
use rolo_config::RemoteConfig;
use rolo_core::time::{format_timestamp_datetime, now_utc};
use rolo_store::repo::Session;
use rolo_sync::auth::AuthClient;
use serde::Serialize;

#[derive(Debug, Args)]
pub struct SignupArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
}

#[derive(Debug, Args)]
pub struct LogoutArgs {}

#[derive(Debug, Args)]
pub struct WhoamiArgs {}

#[derive(Debug, Serialize)]
struct WhoamiDto {
    user_id: String,
    email: String,
    signed_in_at: i64,
}

fn remote_config<'a>(ctx: &'a Context<'_>) -> Result<&'a RemoteConfig> {
    ctx.config.remote.as_ref().ok_or_else(|| {
        invalid_input("no remote endpoint configured; add a [remote] section to the config")
    })
}

pub fn signup(ctx: &Context<'_>, args: SignupArgs) -> Result<()> {
    let remote = remote_config(ctx)?;
    let client = AuthClient::new(&remote.url, &remote.anon_key)?;
    let user_id = client.sign_up(&args.email, &args.password)?;

    if ctx.json {
        return print_json(&serde_json::json!({ "user_id": user_id, "email": args.email }));
    }
    println!("signed up {} (user {user_id}); run `rolo login` to start syncing", args.email);
    Ok(())
}

pub fn login(ctx: &Context<'_>, args: LoginArgs) -> Result<()> {
    let now = now_utc();
    let remote = remote_config(ctx)?;
    let client = AuthClient::new(&remote.url, &remote.anon_key)?;
    let auth = client.sign_in(&args.email, &args.password)?;

    let session = Session {
        user_id: auth.user_id,
        email: auth.email,
        access_token: auth.access_token,
        created_at: now,
    };
    ctx.store.session().set(&session)?;

    if ctx.json {
        return print_json(&WhoamiDto {
            user_id: session.user_id,
            email: session.email,
            signed_in_at: session.created_at,
        });
    }
    println!("logged in as {}", session.email);
    Ok(())
}

pub fn logout(ctx: &Context<'_>, _args: LogoutArgs) -> Result<()> {
    let cleared = ctx.store.session().clear()?;
    if ctx.json {
        return print_json(&serde_json::json!({ "logged_out": cleared }));
    }
    if cleared {
        println!("logged out; cached contacts stay on this machine");
    } else {
        println!("no active session");
    }
    Ok(())
}

pub fn whoami(ctx: &Context<'_>, _args: WhoamiArgs) -> Result<()> {
    match ctx.session()? {
        Some(session) => {
            if ctx.json {
                return print_json(&WhoamiDto {
                    user_id: session.user_id,
                    email: session.email,
                    signed_in_at: session.created_at,
                });
            }
            println!(
                "{} (user {}) since {}",
                session.email,
                session.user_id,
                format_timestamp_datetime(session.created_at)
            );
        }
        None => {
            if ctx.json {
                return print_json(&serde_json::json!({ "user_id": null }));
            }
            println!("not logged in");
        }
    }
    Ok(())
}
