use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use crate::util::parse_category;
use anyhow::Result;
use clap::Args;
use rolo_core::domain::Category;
use rolo_core::time::now_utc;
use rolo_sync::remote::{self, SyncReport};

#[derive(Debug, Args)]
pub struct SyncArgs {
    #[arg(long)]
    pub category: Option<String>,
}

/// Local-first catch-up: pushes cached contacts that never reached the
/// remote tables and marks the accepted ones as synced.
pub fn sync_pending(ctx: &Context<'_>, args: SyncArgs) -> Result<()> {
    let now = now_utc();
    let Some(session) = ctx.session()? else {
        return Err(invalid_input("not signed in; run `rolo login` first"));
    };
    let Some(sink) = ctx.remote_sink(&session)? else {
        return Err(invalid_input(
            "no remote endpoint configured; add a [remote] section to the config",
        ));
    };

    let categories: Vec<Category> = match args.category.as_deref() {
        Some(raw) => vec![parse_category(raw)?],
        None => Category::ALL.to_vec(),
    };

    let mut reports: Vec<SyncReport> = Vec::new();
    for category in categories {
        let pending = ctx
            .store
            .contacts()
            .list_unsynced(Some(&session.user_id), Some(category))?;
        if pending.is_empty() {
            continue;
        }
        let report = remote::push_contacts(&sink, category, &pending);
        ctx.store.contacts().mark_synced(&report.synced_ids, now)?;
        reports.push(report);
    }

    if ctx.json {
        return print_json(&reports);
    }

    if reports.is_empty() {
        println!("nothing to sync");
        return Ok(());
    }
    for report in &reports {
        println!(
            "{}: pushed {} contacts in {} batches ({} failed)",
            report.table, report.inserted, report.batches, report.failed_batches
        );
        for warning in &report.warnings {
            println!("- {}", warning);
        }
    }
    Ok(())
}
