//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/quotebook/config.toml)
//! 3. Environment variables (QUOTEBOOK_* prefix)
//!
//! Environment variables take precedence over config file values.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable prefix
const ENV_PREFIX: &str = "QUOTEBOOK";

/// Public placeholder API used as the default remote quote source
pub const DEFAULT_FETCH_URL: &str = "https://jsonplaceholder.typicode.com/posts";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory for durable data (the quote collection)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Directory for session-scoped data (last shown quote)
    ///
    /// Defaults to the login session's runtime directory.
    #[serde(default)]
    pub session_dir: Option<PathBuf>,

    /// Whether remote sync is enabled
    #[serde(default = "default_true")]
    pub sync_enabled: bool,

    /// Endpoint returning a JSON array of remote items (empty disables fetch)
    #[serde(default = "default_fetch_url")]
    pub fetch_url: String,

    /// Endpoint accepting the local collection before each fetch (optional)
    #[serde(default)]
    pub push_url: Option<String>,

    /// Number of remote items consumed per fetch
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: usize,

    /// Category assigned to every remote quote
    #[serde(default = "default_server_category")]
    pub server_category: String,

    /// Remote item field that holds the quote text
    #[serde(default = "default_title_field")]
    pub title_field: String,

    /// Seconds between periodic sync cycles
    #[serde(default = "default_sync_interval")]
    pub sync_interval_secs: u64,

    /// Seconds a status message stays visible
    #[serde(default = "default_status_clear")]
    pub status_clear_secs: u64,

    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Log file used when QUOTEBOOK_LOG is set
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            session_dir: None,
            sync_enabled: true,
            fetch_url: default_fetch_url(),
            push_url: None,
            fetch_limit: default_fetch_limit(),
            server_category: default_server_category(),
            title_field: default_title_field(),
            sync_interval_secs: default_sync_interval(),
            status_clear_secs: default_status_clear(),
            request_timeout_secs: default_request_timeout(),
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (QUOTEBOOK_DATA_DIR, QUOTEBOOK_FETCH_URL, ...)
    /// 2. Config file (~/.config/quotebook/config.toml or QUOTEBOOK_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring a path given on the command line
    pub fn load_with_cli_override(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.ensure_data_dir()?;
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var(format!("{}_SESSION_DIR", ENV_PREFIX)) {
            self.session_dir = if val.is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }

        if let Ok(val) = std::env::var(format!("{}_FETCH_URL", ENV_PREFIX)) {
            self.fetch_url = val;
        }

        if let Ok(val) = std::env::var(format!("{}_PUSH_URL", ENV_PREFIX)) {
            self.push_url = if val.is_empty() { None } else { Some(val) };
        }

        if let Ok(val) = std::env::var(format!("{}_SYNC_ENABLED", ENV_PREFIX)) {
            self.sync_enabled = val.eq_ignore_ascii_case("true") || val == "1";
        }
    }

    /// Ensure data directory exists
    fn ensure_data_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)
                .with_context(|| format!("Failed to create data directory: {:?}", self.data_dir))?;
        }
        Ok(())
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with QUOTEBOOK_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("quotebook")
            .join("config.toml")
    }

    /// Get the path to the durable quote collection
    pub fn quotes_path(&self) -> PathBuf {
        self.data_dir.join("quotes.json")
    }

    /// Get the path to the session-scoped last shown quote
    pub fn last_quote_path(&self) -> PathBuf {
        self.effective_session_dir().join("last_quote.json")
    }

    /// Session directory in effect
    ///
    /// `$XDG_RUNTIME_DIR` is removed when the user's login session ends,
    /// which gives the last shown quote its session lifetime.
    pub fn effective_session_dir(&self) -> PathBuf {
        self.session_dir.clone().unwrap_or_else(|| {
            dirs::runtime_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("quotebook")
        })
    }

    /// Whether sync can run: enabled and a fetch endpoint configured
    pub fn sync_configured(&self) -> bool {
        self.sync_enabled && !self.fetch_url.is_empty()
    }

    pub fn sync_interval(&self) -> Duration {
        Duration::from_secs(self.sync_interval_secs.max(1))
    }

    pub fn status_clear_delay(&self) -> Duration {
        Duration::from_secs(self.status_clear_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("quotebook")
}

fn default_true() -> bool {
    true
}

fn default_fetch_url() -> String {
    DEFAULT_FETCH_URL.to_string()
}

fn default_fetch_limit() -> usize {
    5
}

fn default_server_category() -> String {
    "Server".to_string()
}

fn default_title_field() -> String {
    "title".to_string()
}

fn default_sync_interval() -> u64 {
    30
}

fn default_status_clear() -> u64 {
    5
}

fn default_request_timeout() -> u64 {
    10
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard that locks env access and saves/restores env vars
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl<'a> EnvGuard<'a> {
        fn new(vars: &[&str]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
            let saved = vars
                .iter()
                .map(|&name| (name.to_string(), env::var(name).ok()))
                .collect();
            for name in vars {
                env::remove_var(name);
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    const ENV_VARS: &[&str] = &[
        "QUOTEBOOK_DATA_DIR",
        "QUOTEBOOK_SESSION_DIR",
        "QUOTEBOOK_FETCH_URL",
        "QUOTEBOOK_PUSH_URL",
        "QUOTEBOOK_SYNC_ENABLED",
    ];

    /// Config rooted in a temp dir with sync pointed nowhere
    pub(crate) fn test_config(temp_dir: &tempfile::TempDir) -> Config {
        Config {
            data_dir: temp_dir.path().join("data"),
            session_dir: Some(temp_dir.path().join("session")),
            fetch_url: String::new(),
            ..Config::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.sync_enabled);
        assert_eq!(config.fetch_url, DEFAULT_FETCH_URL);
        assert!(config.push_url.is_none());
        assert_eq!(config.fetch_limit, 5);
        assert_eq!(config.server_category, "Server");
        assert_eq!(config.sync_interval(), Duration::from_secs(30));
        assert_eq!(config.status_clear_delay(), Duration::from_secs(5));
        assert!(config.data_dir.ends_with("quotebook"));
    }

    #[test]
    fn test_file_paths() {
        let config = Config {
            data_dir: PathBuf::from("/data/quotebook"),
            session_dir: Some(PathBuf::from("/run/user/1000/quotebook")),
            ..Config::default()
        };

        assert_eq!(config.quotes_path(), PathBuf::from("/data/quotebook/quotes.json"));
        assert_eq!(
            config.last_quote_path(),
            PathBuf::from("/run/user/1000/quotebook/last_quote.json")
        );
    }

    #[test]
    fn test_default_session_dir_is_separate_from_data_dir() {
        let config = Config::default();
        assert!(config.effective_session_dir().ends_with("quotebook"));
        assert_ne!(config.effective_session_dir(), config.data_dir);
    }

    #[test]
    fn test_env_override_data_dir() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("QUOTEBOOK_DATA_DIR", "/tmp/quotebook-test");
        config.apply_env_overrides();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/quotebook-test"));
    }

    #[test]
    fn test_env_override_sync_enabled() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("QUOTEBOOK_SYNC_ENABLED", "false");
        config.apply_env_overrides();
        assert!(!config.sync_enabled);

        env::set_var("QUOTEBOOK_SYNC_ENABLED", "1");
        config.apply_env_overrides();
        assert!(config.sync_enabled);

        env::set_var("QUOTEBOOK_SYNC_ENABLED", "TRUE");
        config.sync_enabled = false;
        config.apply_env_overrides();
        assert!(config.sync_enabled);
    }

    #[test]
    fn test_env_override_urls() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("QUOTEBOOK_PUSH_URL", "http://localhost:8080/quotes");
        env::set_var("QUOTEBOOK_FETCH_URL", "");
        config.apply_env_overrides();

        assert_eq!(
            config.push_url.as_deref(),
            Some("http://localhost:8080/quotes")
        );
        // Empty fetch URL disables sync
        assert!(config.fetch_url.is_empty());
        assert!(!config.sync_configured());
    }

    #[test]
    fn test_serialization() {
        let _guard = EnvGuard::new(ENV_VARS);

        let config = Config {
            data_dir: PathBuf::from("/data/quotebook"),
            push_url: Some("http://example.com/push".to_string()),
            fetch_limit: 10,
            ..Config::default()
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("data_dir"));
        assert!(toml_str.contains("push_url"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_partial_file() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = tempfile::TempDir::new().unwrap();
        let data_dir = temp_dir.path().join("custom");
        let path = temp_dir.path().join("config.toml");

        let toml = format!(
            r#"
            data_dir = '{}'
            fetch_url = "http://example.com/posts"
            sync_enabled = false
            server_category = "Remote"
            "#,
            data_dir.display()
        );
        std::fs::write(&path, toml).unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.data_dir, data_dir);
        assert!(data_dir.exists());
        assert_eq!(config.fetch_url, "http://example.com/posts");
        assert!(!config.sync_enabled);
        assert_eq!(config.server_category, "Remote");
        // Unspecified keys fall back to defaults
        assert_eq!(config.fetch_limit, 5);
        assert_eq!(config.title_field, "title");
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = tempfile::TempDir::new().unwrap();
        env::set_var("QUOTEBOOK_DATA_DIR", temp_dir.path().join("data"));

        let path = temp_dir.path().join("missing.toml");
        let config = Config::load_from_path(&path).unwrap();

        assert!(config.sync_enabled);
        assert!(config.data_dir.exists());
    }

    #[test]
    fn test_save_and_reload() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = Config {
            data_dir: temp_dir.path().join("data"),
            sync_interval_secs: 60,
            ..Config::default()
        };
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
