use anyhow::Result;
use rolo_config::AppConfig;
use rolo_store::repo::Session;
use rolo_store::Store;
use rolo_sync::remote::SupabaseSink;
use serde::Serialize;
use std::io::{self, Write};

pub mod auth;
pub mod completions;
pub mod contacts;
pub mod import;
pub mod sync;

pub struct Context<'a> {
    pub store: &'a Store,
    pub json: bool,
    pub config: &'a AppConfig,
}

impl Context<'_> {
    pub fn session(&self) -> Result<Option<Session>> {
        Ok(self.store.session().get()?)
    }

    /// A sink exists only when the user is signed in and a remote endpoint is
    /// configured; everything else stays local-only.
    pub fn remote_sink(&self, session: &Session) -> Result<Option<SupabaseSink>> {
        match &self.config.remote {
            Some(remote) => Ok(Some(SupabaseSink::new(
                &remote.url,
                &remote.anon_key,
                &session.access_token,
            )?)),
            None => Ok(None),
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
