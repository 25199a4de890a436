//! Durable quote persistence
//!
//! Saves and loads the full quote collection as a JSON document. Every save
//! overwrites the previous document entirely, using an atomic write (write to
//! temp file, then rename) so a crash never leaves a half-written file.
//!
//! Loading is lenient: a missing, unreadable or unparsable document is
//! reported as absent so startup can fall back to defaults. Unparsable
//! documents are copied aside first so their contents are not lost when the
//! next save replaces them.
//!
//! Storage location: `~/.local/share/quotebook/quotes.json` (configurable
//! via `Config`)

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::error::{StorageError, StorageResult};
use crate::config::Config;
use crate::models::Quote;

/// Suffix appended to an unparsable document's path when backing it up
const CORRUPT_BACKUP_SUFFIX: &str = "corrupt.backup";

/// Durable storage for the quote collection
#[derive(Debug, Clone)]
pub struct QuotePersistence {
    path: PathBuf,
}

impl QuotePersistence {
    /// Create a persistence handler for the given document path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a persistence handler at the configured location
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.quotes_path())
    }

    /// Path of the stored document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if a document exists on disk
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Save the full collection, replacing whatever was stored before
    pub fn save(&self, quotes: &[Quote]) -> StorageResult<()> {
        let json = serde_json::to_string(quotes)?;
        atomic_write(&self.path, json.as_bytes())?;
        debug!("Saved {} quotes to {:?}", quotes.len(), self.path);
        Ok(())
    }

    /// Load the stored collection
    ///
    /// Returns `None` when nothing usable is stored.
    pub fn load(&self) -> Option<Vec<Quote>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Could not read {:?}, ignoring stored quotes: {}", self.path, e);
                return None;
            }
        };

        match serde_json::from_str::<Vec<Quote>>(&content) {
            Ok(quotes) => {
                debug!("Loaded {} quotes from {:?}", quotes.len(), self.path);
                Some(quotes)
            }
            Err(e) => {
                warn!("Stored quotes in {:?} are corrupted: {}", self.path, e);
                self.backup_corrupt();
                None
            }
        }
    }

    /// Path a corrupted document is copied to
    pub fn corrupt_backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".");
        name.push(CORRUPT_BACKUP_SUFFIX);
        PathBuf::from(name)
    }

    fn backup_corrupt(&self) {
        let backup = self.corrupt_backup_path();
        match fs::copy(&self.path, &backup) {
            Ok(_) => warn!("Backed up corrupted quotes to {:?}", backup),
            Err(e) => warn!("Failed to back up corrupted quotes to {:?}: {}", backup, e),
        }
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
pub(crate) fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StorageError::from_io(e, parent.to_path_buf()))?;
    }

    // Same directory, so the rename stays on one filesystem
    let temp_path = path.with_extension("tmp");

    let mut file =
        File::create(&temp_path).map_err(|e| StorageError::from_io(e, temp_path.clone()))?;
    file.write_all(data)
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;
    file.sync_all()
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|source| StorageError::AtomicWriteFailed {
        from: temp_path.clone(),
        to: path.to_path_buf(),
        source,
    })?;

    Ok(())
}
