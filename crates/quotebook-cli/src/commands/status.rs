//! Status command handler

use anyhow::Result;

use quotebook_core::QuoteStore;

use crate::output::{Output, OutputFormat};

/// Show status information
pub fn show(store: &QuoteStore, output: &Output) -> Result<()> {
    let config = store.config();
    let last_shown = store.last_shown();

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "quotes": store.len(),
                    "categories": store.categories(),
                    "last_shown": last_shown,
                    "storage": {
                        "quotes_path": config.quotes_path(),
                        "session_path": config.last_quote_path()
                    },
                    "sync": {
                        "enabled": config.sync_enabled,
                        "configured": config.sync_configured(),
                        "fetch_url": config.fetch_url,
                        "push_url": config.push_url,
                        "interval_secs": config.sync_interval().as_secs()
                    }
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", store.len());
        }
        OutputFormat::Human => {
            println!("Quotebook Status");
            println!("================");
            println!();
            println!("Contents:");
            println!("  Quotes:     {}", store.len());
            println!("  Categories: {}", store.categories().len());
            if let Some(ref quote) = last_shown {
                println!("  Last shown: {}", quote);
            }
            println!();
            println!("Sync:");
            println!(
                "  Status:   {}",
                if config.sync_configured() {
                    "enabled"
                } else {
                    "disabled"
                }
            );
            if !config.fetch_url.is_empty() {
                println!("  Fetch:    {}", config.fetch_url);
            }
            if let Some(ref url) = config.push_url {
                println!("  Push:     {}", url);
            }
            println!("  Interval: {}s", config.sync_interval().as_secs());
            println!();
            println!("Storage:");
            println!("  Quotes:  {}", config.quotes_path().display());
            println!("  Session: {}", config.last_quote_path().display());
        }
    }

    Ok(())
}
