use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use crate::util::parse_category;
use anyhow::{Context as _, Result};
use clap::Args;
use rolo_core::rules::{build_contacts, import_source_tag};
use rolo_core::time::{format_timestamp_date, now_utc};
use rolo_sync::{remote, xlsx};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ImportArgs {
    pub file: PathBuf,
    #[arg(long, default_value = "general")]
    pub category: String,
}

#[derive(Debug, Args)]
pub struct FilesArgs {}

#[derive(Debug, Serialize)]
struct ImportReport {
    file: String,
    category: String,
    imported: usize,
    dropped: usize,
    skipped_empty: usize,
    synced: usize,
    failed_batches: usize,
    warnings: Vec<String>,
}

/// The one-shot import pipeline: read, extract, validate, cache, and, with a
/// signed-in session, push in batches. Read and extract failures abort
/// before any cache mutation; remote failures only downgrade to warnings.
pub fn import_file(ctx: &Context<'_>, args: ImportArgs) -> Result<()> {
    let now = now_utc();
    let category = parse_category(&args.category)?;
    let session = ctx.session()?;
    let owner = session.as_ref().map(|session| session.user_id.clone());

    let file_name = args
        .file
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload")
        .to_string();

    let sheet = xlsx::read_sheet(&args.file, &ctx.config.default_country_code)
        .with_context(|| format!("read spreadsheet {}", args.file.display()))?;
    let extracted = sheet.rows.len();

    let contacts = build_contacts(
        sheet.rows,
        category,
        &import_source_tag(&file_name),
        owner.as_deref(),
        now,
    );
    if contacts.is_empty() {
        return Err(invalid_input(
            "the file contains no valid rows: name, email, and phone are required",
        ));
    }

    ctx.store.contacts().append(&contacts)?;
    ctx.store
        .uploaded_files()
        .record(owner.as_deref(), &file_name, now)?;

    let mut report = ImportReport {
        file: file_name,
        category: category.to_string(),
        imported: contacts.len(),
        dropped: extracted - contacts.len(),
        skipped_empty: sheet.skipped_empty,
        synced: 0,
        failed_batches: 0,
        warnings: Vec::new(),
    };

    match &session {
        None => report
            .warnings
            .push("saved locally; log in to sync with the remote tables".to_string()),
        Some(session) => match ctx.remote_sink(session)? {
            None => report
                .warnings
                .push("saved locally; no remote endpoint configured".to_string()),
            Some(sink) => {
                let sync = remote::push_contacts(&sink, category, &contacts);
                ctx.store.contacts().mark_synced(&sync.synced_ids, now)?;
                report.synced = sync.inserted;
                report.failed_batches = sync.failed_batches;
                report.warnings.extend(sync.warnings);
            }
        },
    }

    if ctx.json {
        return print_json(&report);
    }

    println!(
        "Imported {} contacts from {} into {} (dropped {}, blank rows {})",
        report.imported, report.file, report.category, report.dropped, report.skipped_empty
    );
    if report.synced > 0 {
        println!("Synced {} contacts to the remote table", report.synced);
    }
    if !report.warnings.is_empty() {
        println!("Warnings:");
        for warning in &report.warnings {
            println!("- {}", warning);
        }
    }
    Ok(())
}

pub fn list_files(ctx: &Context<'_>, _args: FilesArgs) -> Result<()> {
    let session = ctx.session()?;
    let owner = session.as_ref().map(|session| session.user_id.as_str());
    let files = ctx.store.uploaded_files().list(owner)?;

    if ctx.json {
        let items: Vec<_> = files
            .iter()
            .map(|file| {
                serde_json::json!({
                    "file_name": file.file_name,
                    "uploaded_at": file.created_at,
                })
            })
            .collect();
        return print_json(&items);
    }

    if files.is_empty() {
        println!("no files imported yet");
        return Ok(());
    }
    for file in &files {
        println!(
            "{}  {}",
            format_timestamp_date(file.created_at),
            file.file_name
        );
    }
    Ok(())
}
