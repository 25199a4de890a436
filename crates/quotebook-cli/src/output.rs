//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use quotebook_core::sync::{StatusMessage, StatusTone, SyncOutcome, SyncReport};
use quotebook_core::{Quote, StorageError};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Print the quote being shown, or the "no quotes" state
    pub fn print_quote(&self, quote: Option<&Quote>) {
        match self.format {
            OutputFormat::Human => match quote {
                Some(quote) => println!("{}", quote),
                None => println!("No quotes available in this category."),
            },
            OutputFormat::Json => {
                println!("{}", serde_json::json!({ "quote": quote }));
            }
            OutputFormat::Quiet => {
                if let Some(quote) = quote {
                    println!("{}", quote.text);
                }
            }
        }
    }

    /// Print a list of quotes
    pub fn print_quotes(&self, quotes: &[&Quote]) {
        match self.format {
            OutputFormat::Human => {
                if quotes.is_empty() {
                    println!("No quotes found.");
                    return;
                }
                for quote in quotes {
                    println!("{} | {}", truncate(&quote.category, 15), quote.text);
                }
                println!("\n{} quote(s)", quotes.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::json!(quotes));
            }
            OutputFormat::Quiet => {
                for quote in quotes {
                    println!("{}", quote.text);
                }
            }
        }
    }

    /// Print the category list
    pub fn print_categories(&self, categories: &[String]) {
        match self.format {
            OutputFormat::Human => {
                if categories.is_empty() {
                    println!("No categories.");
                    return;
                }
                println!("Categories: all, {}", categories.join(", "));
            }
            OutputFormat::Json => {
                println!("{}", serde_json::json!({ "categories": categories }));
            }
            OutputFormat::Quiet => {
                for category in categories {
                    println!("{}", category);
                }
            }
        }
    }

    /// Print a sync status message
    ///
    /// A cleared status prints nothing.
    pub fn print_status(&self, status: Option<&StatusMessage>) {
        let Some(status) = status else {
            return;
        };
        match self.format {
            OutputFormat::Human => {
                let marker = match status.tone {
                    StatusTone::Success => "✓",
                    StatusTone::Neutral => "•",
                };
                println!("[sync] {} {}", marker, status.message);
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "status": status.message,
                        "tone": tone_name(status.tone),
                        "at": status.posted_at.to_rfc3339()
                    })
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print the result of a sync cycle
    pub fn print_report(&self, report: &SyncReport) {
        match self.format {
            OutputFormat::Human => {
                let (message, tone) = report.status_message();
                match tone {
                    StatusTone::Success => println!("✓ {}", message),
                    StatusTone::Neutral => println!("{}", message),
                }
                if let SyncOutcome::Synced { added, categories } = &report.outcome {
                    println!("  New quotes: {}", added);
                    println!("  Categories: {}", categories.join(", "));
                }
            }
            OutputFormat::Json => {
                let value = match &report.outcome {
                    SyncOutcome::Synced { added, categories } => serde_json::json!({
                        "status": "synced",
                        "added": added,
                        "categories": categories,
                    }),
                    SyncOutcome::NoChange => serde_json::json!({ "status": "no-change" }),
                    SyncOutcome::Failed { reason } => {
                        serde_json::json!({ "status": "failed", "reason": reason })
                    }
                };
                println!("{}", value);
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a user-facing error that does not end the program
    pub fn notice(&self, msg: &str) {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"status": "error", "message": msg}));
            }
            _ => eprintln!("⚠ {}", msg),
        }
    }
}

/// Recovery suggestion for a failed save anywhere in the error chain
pub fn storage_hint(err: &anyhow::Error) -> Option<String> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<StorageError>())
        .and_then(StorageError::recovery_suggestion)
}

fn tone_name(tone: StatusTone) -> &'static str {
    match tone {
        StatusTone::Success => "success",
        StatusTone::Neutral => "neutral",
    }
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
