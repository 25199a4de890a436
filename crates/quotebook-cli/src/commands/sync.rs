//! Sync command handler

use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use tokio::sync::Mutex;

use quotebook_core::sync::{HttpRemote, Syncer};
use quotebook_core::QuoteStore;

use crate::output::Output;

/// Run one sync cycle against the configured remote
pub async fn sync(store: QuoteStore, output: &Output) -> Result<()> {
    let config = store.config().clone();

    if !config.sync_enabled {
        bail!(
            "Sync is not enabled. Enable it with:\n  \
             quotebook config set sync_enabled true"
        );
    }

    if config.fetch_url.is_empty() {
        bail!(
            "Fetch URL not configured. Set it with:\n  \
             quotebook config set fetch_url https://your-server/quotes"
        );
    }

    let remote = HttpRemote::from_config(&config).context("Failed to create sync client")?;

    output.message(&format!("Syncing with {}...", config.fetch_url));

    let syncer = Syncer::new(Arc::new(remote), Arc::new(Mutex::new(store)));
    let report = syncer.sync().await;
    output.print_report(&report);

    match report.reason() {
        Some(reason) => Err(anyhow!("Sync failed: {}", reason)),
        None => Ok(()),
    }
}
