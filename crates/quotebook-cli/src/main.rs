//! Quotebook CLI
//!
//! Command-line interface for Quotebook - a local quote collection with
//! remote sync.

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use quotebook_core::{Config, QuoteStore};

mod commands;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "quotebook")]
#[command(about = "Quotebook - quotes by category, synced with a remote source")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use this config file instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current quote (restored from this session, or a random one)
    Show {
        /// Only pick from this category ("all" for every category)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show a new random quote
    Next {
        /// Only pick from this category ("all" for every category)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Add a quote
    Add {
        /// Quote text
        text: String,
        /// Quote category
        category: String,
    },
    /// List quotes
    #[command(alias = "ls")]
    List {
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// List all categories
    Categories,
    /// Import quotes from a JSON file
    Import {
        /// File containing a JSON array of quotes
        file: PathBuf,
    },
    /// Export all quotes to a JSON file
    Export {
        /// Output file
        #[arg(short, long, default_value = quotebook_core::codec::EXPORT_FILE_NAME)]
        output: PathBuf,
    },
    /// Sync with the remote source once
    Sync,
    /// Show quotes interactively with background sync
    Watch {
        /// Only pick from this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show status (collection size, storage paths, sync settings)
    Status,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, fetch_url, sync_enabled, ...)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_deref();

    // Config commands don't need the store
    if let Some(Commands::Config { command }) = &cli.command {
        return match command.clone() {
            Some(ConfigCommands::Show) | None => commands::config::show(config_path, &output),
            Some(ConfigCommands::Set { key, value }) => {
                commands::config::set(key, value, config_path, &output)
            }
        };
    }

    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    init_logging(&config);

    let mut store = QuoteStore::open_with_config(config).context("Failed to open quote store")?;

    let result = match cli.command.unwrap_or(Commands::Show { category: None }) {
        Commands::Show { category } => commands::quote::show(&mut store, category, &output),
        Commands::Next { category } => commands::quote::next(&mut store, category, &output),
        Commands::Add { text, category } => {
            commands::quote::add(&mut store, text, category, &output)
        }
        Commands::List { category } => commands::quote::list(&store, category, &output),
        Commands::Categories => commands::quote::categories(&store, &output),
        Commands::Import { file } => commands::transfer::import(&mut store, &file, &output),
        Commands::Export { output: path } => commands::transfer::export(&store, &path, &output),
        Commands::Sync => commands::sync::sync(store, &output).await,
        Commands::Watch { category } => commands::watch::run(store, category, &output).await,
        Commands::Status => commands::status::show(&store, &output),
        Commands::Config { .. } => Ok(()), // Handled above
    };

    if let Err(ref e) = result {
        if let Some(hint) = output::storage_hint(e) {
            output.notice(&hint);
        }
    }

    result
}

/// Initialize file logging
///
/// Only active when QUOTEBOOK_LOG is set; its value is the level.
fn init_logging(config: &Config) {
    let Ok(log_level) = std::env::var("QUOTEBOOK_LOG") else {
        return;
    };

    let log_path = config
        .log_file
        .clone()
        .unwrap_or_else(|| config.data_dir.join("debug.log"));

    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            return;
        }
    };

    let env_filter = EnvFilter::new(format!(
        "quotebook_core={},quotebook_cli={}",
        log_level, log_level
    ));

    // Ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("Logging initialized to {:?}", log_path);
}
