//! Session-scoped storage
//!
//! Holds the last shown quote, independent from the durable collection.
//! When backed by a path inside the session directory the slot lives as long
//! as the login session; without a path it only lives in memory.

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::{debug, warn};

use super::error::StorageResult;
use super::persistence::atomic_write;
use crate::config::Config;
use crate::models::Quote;

/// Slot for the last shown quote
#[derive(Debug, Default)]
pub struct SessionSlot {
    /// Last quote remembered in this process
    last: Option<Quote>,
    /// Path to persist the slot
    path: Option<PathBuf>,
}

impl SessionSlot {
    /// Create a slot persisted at `path`
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            last: None,
            path: Some(path),
        }
    }

    /// Create a slot at the configured session location
    pub fn from_config(config: &Config) -> Self {
        Self::with_path(config.last_quote_path())
    }

    /// Remember the quote that was just shown
    pub fn remember(&mut self, quote: &Quote) -> StorageResult<()> {
        self.last = Some(quote.clone());

        let Some(ref path) = self.path else {
            return Ok(());
        };

        let json = serde_json::to_string(quote)?;
        atomic_write(path, json.as_bytes())?;
        debug!("Remembered last shown quote in {:?}", path);
        Ok(())
    }

    /// Recall the last shown quote of this session
    ///
    /// A quote remembered by this process wins over the file, even if
    /// writing it failed. Missing or unparsable data means nothing was shown
    /// yet.
    pub fn recall(&self) -> Option<Quote> {
        if self.last.is_some() {
            return self.last.clone();
        }
        let path = self.path.as_ref()?;

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Could not read last shown quote {:?}: {}", path, e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(quote) => Some(quote),
            Err(e) => {
                warn!("Ignoring unparsable last shown quote {:?}: {}", path, e);
                None
            }
        }
    }
}
