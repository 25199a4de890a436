//! Interactive watch loop
//!
//! Shows a quote, then reads one-line commands from stdin while the sync
//! service runs in the background. Status messages are printed as they
//! change and clear themselves after a few seconds.

use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use quotebook_core::sync::{
    spawn_sync_service, HttpRemote, SharedStore, StatusBoard, SyncEvent, SyncHandle, SyncOutcome,
    Syncer,
};
use quotebook_core::{CategoryFilter, QuoteDraft, QuoteStore};

use crate::output::{storage_hint, Output};

const HELP: &str = "Commands:\n  \
    n [category]          next quote (\"all\" for every category)\n  \
    a <text> | <category> add a quote\n  \
    c                     list categories\n  \
    s                     sync now\n  \
    h                     help\n  \
    q                     quit";

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    /// Show the next quote, optionally switching category
    Next(Option<String>),
    Add(QuoteDraft),
    Categories,
    Sync,
    Help,
    Quit,
    Unknown(String),
}

impl Input {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "" | "n" | "next" => Input::Next(Some(rest).filter(|r| !r.is_empty()).map(String::from)),
            "a" | "add" => {
                let (text, category) = rest.split_once('|').unwrap_or((rest, ""));
                Input::Add(QuoteDraft::new(text.trim(), category.trim()))
            }
            "c" | "categories" => Input::Categories,
            "s" | "sync" => Input::Sync,
            "h" | "help" | "?" => Input::Help,
            "q" | "quit" | "exit" => Input::Quit,
            _ => Input::Unknown(line.to_string()),
        }
    }
}

/// Run the watch loop until the user quits or stdin closes
pub async fn run(store: QuoteStore, category: Option<String>, output: &Output) -> Result<()> {
    let config = store.config().clone();
    let mut filter = CategoryFilter::parse(category.as_deref());
    let store: SharedStore = Arc::new(Mutex::new(store));
    let board = StatusBoard::new(config.status_clear_delay());

    {
        let mut store = store.lock().await;
        output.print_quote(store.current_or_random(&filter).as_ref());
        output.print_categories(&store.categories());
    }

    let mut sync = if config.sync_configured() {
        match HttpRemote::from_config(&config) {
            Ok(remote) => {
                let syncer = Syncer::new(Arc::new(remote), store.clone()).with_status(board.clone());
                Some(spawn_sync_service(syncer, config.sync_interval()))
            }
            Err(e) => {
                warn!("Sync client unavailable: {}", e);
                output.notice(&format!("Sync unavailable: {}", e));
                None
            }
        }
    } else {
        None
    };

    if !output.is_quiet() {
        output.message(HELP);
    }

    let mut status_rx = board.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match Input::parse(&line) {
                    Input::Next(next_category) => {
                        if let Some(next_category) = next_category {
                            filter = CategoryFilter::parse(Some(&next_category));
                        }
                        let quote = store.lock().await.show_random(&filter);
                        output.print_quote(quote.as_ref());
                    }
                    Input::Add(draft) => add_quote(&store, &draft, output).await,
                    Input::Categories => {
                        output.print_categories(&store.lock().await.categories());
                    }
                    Input::Sync => match sync.as_ref() {
                        Some(handle) => {
                            if !handle.sync_now().await {
                                output.notice("Sync service has stopped");
                            }
                        }
                        None => output.notice("Sync is not configured"),
                    },
                    Input::Help => output.message(HELP),
                    Input::Quit => break,
                    Input::Unknown(line) => {
                        output.notice(&format!("Unknown command: {} (h for help)", line));
                    }
                }
            }
            Ok(()) = status_rx.changed() => {
                let status = status_rx.borrow_and_update().clone();
                output.print_status(status.as_ref());
            }
            Some(event) = next_event(&mut sync) => {
                if let SyncEvent::Finished(trigger, report) = event {
                    debug!("{:?} sync finished: {:?}", trigger, report.outcome);
                    if let SyncOutcome::Synced { categories, .. } = &report.outcome {
                        output.print_categories(categories);
                    }
                }
            }
        }
    }

    // An in-flight cycle is abandoned with the runtime
    drop(sync);
    Ok(())
}

/// Validate and add a quote, keeping the input visible on rejection
async fn add_quote(store: &SharedStore, draft: &QuoteDraft, output: &Output) {
    match store.lock().await.add_quote(draft) {
        Ok(quote) => output.success(&format!("Added {}", quote)),
        Err(e) => {
            output.notice(&format!("{:#}", e));
            if let Some(hint) = storage_hint(&e) {
                output.notice(&hint);
            }
            output.message(&format!("  a {} | {}", draft.text, draft.category));
        }
    }
}

/// Next event from the sync service, or never if there is none
async fn next_event(sync: &mut Option<SyncHandle>) -> Option<SyncEvent> {
    match sync {
        Some(handle) => handle.event_rx.recv().await,
        None => std::future::pending().await,
    }
}
