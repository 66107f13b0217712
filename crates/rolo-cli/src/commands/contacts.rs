use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use crate::util::parse_category;
use anyhow::Result;
use clap::Args;
use rolo_core::domain::{normalize_phone, MANUAL_ENTRY_SOURCE};
use rolo_core::rules::{build_contacts, CandidateRow};
use rolo_core::time::{format_timestamp_datetime, now_utc};
use rolo_sync::remote;
use tracing::warn;

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub country_code: Option<String>,
    #[arg(long, default_value = "general")]
    pub category: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Debug, Args)]
pub struct ClearArgs {}

pub fn add_contact(ctx: &Context<'_>, args: AddArgs) -> Result<()> {
    let now = now_utc();
    let category = parse_category(&args.category)?;
    let session = ctx.session()?;
    let owner = session.as_ref().map(|session| session.user_id.clone());

    let normalized = normalize_phone(
        &args.phone,
        args.country_code.as_deref(),
        &ctx.config.default_country_code,
    );
    let rows = vec![CandidateRow {
        name: args.name,
        email: args.email,
        country_code: normalized.country_code,
        phone: normalized.phone,
    }];

    let contacts = build_contacts(rows, category, MANUAL_ENTRY_SOURCE, owner.as_deref(), now);
    let Some(mut contact) = contacts.into_iter().next() else {
        return Err(invalid_input("name, email, and phone are required"));
    };

    ctx.store.contacts().append(std::slice::from_ref(&contact))?;

    // Notification endpoints are best-effort; a failure never blocks entry.
    if let Some(endpoint) = ctx.config.webhooks.endpoint_for(category) {
        if let Err(err) = rolo_sync::webhook::post_contact(endpoint, &contact) {
            warn!(error = %err, "webhook notification failed");
        }
    }

    let notice = match &session {
        None => "contact added locally; log in to sync".to_string(),
        Some(session) => match ctx.remote_sink(session)? {
            None => "contact added locally; no remote endpoint configured".to_string(),
            Some(sink) => {
                let report =
                    remote::push_contacts(&sink, category, std::slice::from_ref(&contact));
                if report.failed_batches == 0 {
                    ctx.store.contacts().mark_synced(&report.synced_ids, now)?;
                    contact.synced_at = Some(now);
                    format!("contact added to the {category} database")
                } else {
                    format!(
                        "contact added locally only: {}",
                        report.warnings.join("; ")
                    )
                }
            }
        },
    };

    if ctx.json {
        print_json(&contact)?;
    } else {
        println!("{notice}");
    }
    Ok(())
}

pub fn list_contacts(ctx: &Context<'_>, args: ListArgs) -> Result<()> {
    let category = args.category.as_deref().map(parse_category).transpose()?;
    let session = ctx.session()?;
    let owner = session.as_ref().map(|session| session.user_id.as_str());

    let contacts = ctx.store.contacts().list(owner, category)?;

    if ctx.json {
        return print_json(&contacts);
    }

    if contacts.is_empty() {
        println!("no contacts");
        return Ok(());
    }
    for contact in &contacts {
        let sync_marker = if contact.synced_at.is_some() {
            "synced"
        } else {
            "local"
        };
        println!(
            "{}  {}  {}  {} {}  [{}] {} ({})",
            contact.id,
            contact.name,
            contact.email,
            contact.country_code,
            contact.phone,
            contact.category,
            format_timestamp_datetime(contact.created_at),
            sync_marker,
        );
    }
    Ok(())
}

pub fn clear_contacts(ctx: &Context<'_>, _args: ClearArgs) -> Result<()> {
    let session = ctx.session()?;
    let owner = session.as_ref().map(|session| session.user_id.as_str());

    let contacts = ctx.store.contacts().clear(owner)?;
    let files = ctx.store.uploaded_files().clear(owner)?;

    if ctx.json {
        return print_json(&serde_json::json!({
            "contacts_removed": contacts,
            "files_removed": files,
        }));
    }
    println!("removed {contacts} contacts and {files} uploaded-file records");
    Ok(())
}
