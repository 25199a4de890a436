//! Config command handlers

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use quotebook_core::Config;

use crate::output::{Output, OutputFormat};

const VALID_KEYS: &str = "data_dir, session_dir, sync_enabled, fetch_url, push_url, \
     fetch_limit, server_category, title_field, sync_interval_secs, \
     status_clear_secs, request_timeout_secs, log_file";

/// Show current configuration
pub fn show(config_path: Option<&Path>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!(config));
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .map(Path::to_path_buf)
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir:             {}", config.data_dir.display());
            println!(
                "  session_dir:          {}",
                config.effective_session_dir().display()
            );
            println!("  sync_enabled:         {}", config.sync_enabled);
            println!("  fetch_url:            {}", or_not_set(&config.fetch_url));
            println!(
                "  push_url:             {}",
                config.push_url.as_deref().unwrap_or("(not set)")
            );
            println!("  fetch_limit:          {}", config.fetch_limit);
            println!("  server_category:      {}", config.server_category);
            println!("  title_field:          {}", config.title_field);
            println!("  sync_interval_secs:   {}", config.sync_interval_secs);
            println!("  status_clear_secs:    {}", config.status_clear_secs);
            println!("  request_timeout_secs: {}", config.request_timeout_secs);
            println!(
                "  log_file:             {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(key: String, value: String, config_path: Option<&Path>, output: &Output) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    apply(&mut config, &key, &value)?;

    // Save to the CLI-specified path or default
    let save_path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

/// Apply one key/value pair to a config
fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "data_dir" => config.data_dir = value.into(),
        "session_dir" => config.session_dir = optional(value).map(PathBuf::from),
        "sync_enabled" => {
            config.sync_enabled = value
                .parse()
                .context("Invalid value for sync_enabled. Use 'true' or 'false'.")?;
        }
        // "none" clears the fetch URL, which disables sync
        "fetch_url" => config.fetch_url = optional(value).unwrap_or_default(),
        "push_url" => config.push_url = optional(value),
        "fetch_limit" => config.fetch_limit = parse_number(key, value)?,
        "server_category" => config.server_category = value.to_string(),
        "title_field" => config.title_field = value.to_string(),
        "sync_interval_secs" => config.sync_interval_secs = parse_number(key, value)?,
        "status_clear_secs" => config.status_clear_secs = parse_number(key, value)?,
        "request_timeout_secs" => config.request_timeout_secs = parse_number(key, value)?,
        "log_file" => config.log_file = optional(value).map(PathBuf::from),
        _ => {
            bail!(
                "Unknown configuration key: '{}'\nValid keys: {}",
                key,
                VALID_KEYS
            );
        }
    }
    Ok(())
}

/// Empty or "none" means unset
fn optional(value: &str) -> Option<String> {
    if value.is_empty() || value == "none" {
        None
    } else {
        Some(value.to_string())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .ok()
        .with_context(|| format!("Invalid value for {}. Use a whole number.", key))
}

fn or_not_set(value: &str) -> &str {
    if value.is_empty() {
        "(not set)"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_apply_known_keys() {
        let mut config = Config::default();

        apply(&mut config, "fetch_limit", "10").unwrap();
        apply(&mut config, "server_category", "Remote").unwrap();
        apply(&mut config, "push_url", "http://localhost:8080/quotes").unwrap();
        apply(&mut config, "sync_enabled", "false").unwrap();

        assert_eq!(config.fetch_limit, 10);
        assert_eq!(config.server_category, "Remote");
        assert_eq!(
            config.push_url.as_deref(),
            Some("http://localhost:8080/quotes")
        );
        assert!(!config.sync_enabled);
    }

    #[test]
    fn test_apply_none_clears_optional_values() {
        let mut config = Config {
            push_url: Some("http://example.com".to_string()),
            ..Config::default()
        };

        apply(&mut config, "push_url", "none").unwrap();
        apply(&mut config, "fetch_url", "none").unwrap();

        assert!(config.push_url.is_none());
        assert!(config.fetch_url.is_empty());
        assert!(!config.sync_configured());
    }

    #[test]
    fn test_apply_rejects_bad_input() {
        let mut config = Config::default();

        assert!(apply(&mut config, "fetch_limit", "many").is_err());
        assert!(apply(&mut config, "sync_enabled", "maybe").is_err());
        let err = apply(&mut config, "favorite_color", "blue").unwrap_err();
        assert!(err.to_string().contains("Unknown configuration key"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_set_writes_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let output = Output::new(OutputFormat::Quiet);
        Config {
            data_dir: temp_dir.path().join("data"),
            ..Config::default()
        }
        .save_to_path(&path)
        .unwrap();

        set("sync_interval_secs".into(), "60".into(), Some(path.as_path()), &output).unwrap();
        set("server_category".into(), "Remote".into(), Some(path.as_path()), &output).unwrap();

        let saved = Config::load_from_path(&path).unwrap();
        assert_eq!(saved.sync_interval_secs, 60);
        assert_eq!(saved.server_category, "Remote");
    }
}
