//! One sync cycle
//!
//! A cycle runs: push (if the remote takes pushes) → fetch → merge → save if
//! anything changed. A failed push aborts the cycle before fetching. Failures
//! never propagate; they are reported and the collection is left as it was.
//!
//! The store lock is only held while merging, never across network I/O, so
//! other users of the store stay responsive during a cycle. Two cycles
//! running back to back are safe because merging is idempotent.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::error::SyncError;
use super::remote::{PushAck, RemoteSource};
use super::status::{StatusBoard, StatusTone};
use crate::store::QuoteStore;

/// Store shared between the interactive side and the sync task
pub type SharedStore = Arc<Mutex<QuoteStore>>;

/// What a sync cycle did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// New remote quotes were merged and saved
    Synced {
        added: usize,
        /// Refreshed category list after the merge
        categories: Vec<String>,
    },
    /// Remote had nothing new
    NoChange,
    /// Cycle failed; the collection is unchanged
    Failed { reason: String },
}

/// Report of a finished sync cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub outcome: SyncOutcome,
    pub finished_at: DateTime<Utc>,
}

impl SyncReport {
    fn new(outcome: SyncOutcome) -> Self {
        Self {
            outcome,
            finished_at: Utc::now(),
        }
    }

    /// Whether the collection changed
    pub fn changed(&self) -> bool {
        matches!(self.outcome, SyncOutcome::Synced { .. })
    }

    pub fn failed(&self) -> bool {
        matches!(self.outcome, SyncOutcome::Failed { .. })
    }

    /// Failure reason, if the cycle failed
    pub fn reason(&self) -> Option<&str> {
        match &self.outcome {
            SyncOutcome::Failed { reason } => Some(reason),
            _ => None,
        }
    }

    /// Status message for this report
    pub fn status_message(&self) -> (String, StatusTone) {
        match &self.outcome {
            SyncOutcome::Synced { .. } => (
                "Data synced with server. Local data updated.".to_string(),
                StatusTone::Success,
            ),
            SyncOutcome::NoChange => (
                "No new data from server. Local data is up-to-date.".to_string(),
                StatusTone::Neutral,
            ),
            SyncOutcome::Failed { reason } => {
                (format!("Sync failed: {}", reason), StatusTone::Neutral)
            }
        }
    }
}

/// Runs sync cycles against a remote source
#[derive(Clone)]
pub struct Syncer {
    remote: Arc<dyn RemoteSource>,
    store: SharedStore,
    status: Option<StatusBoard>,
}

impl Syncer {
    pub fn new(remote: Arc<dyn RemoteSource>, store: SharedStore) -> Self {
        Self {
            remote,
            store,
            status: None,
        }
    }

    /// Report progress on a status board
    pub fn with_status(mut self, status: StatusBoard) -> Self {
        self.status = Some(status);
        self
    }

    /// The store this syncer merges into
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Run one sync cycle
    pub async fn sync(&self) -> SyncReport {
        self.post("Syncing with server...", StatusTone::Success);

        let outcome = match self.run_cycle().await {
            Ok(outcome) => outcome,
            Err(e) => SyncOutcome::Failed {
                reason: e.to_string(),
            },
        };

        match &outcome {
            SyncOutcome::Synced { added, .. } => info!("Sync complete, {} new quotes", added),
            SyncOutcome::NoChange => info!("Sync complete, already up to date"),
            SyncOutcome::Failed { reason } => warn!("Sync failed: {}", reason),
        }

        let report = SyncReport::new(outcome);
        let (message, tone) = report.status_message();
        self.post(message, tone);
        report
    }

    async fn run_cycle(&self) -> anyhow::Result<SyncOutcome> {
        let snapshot = self.store.lock().await.quotes().to_vec();
        match self.remote.push(&snapshot).await {
            Ok(PushAck::Accepted) => info!("Pushed {} quotes", snapshot.len()),
            Ok(PushAck::Skipped) => {}
            Err(e) => return Err(SyncError::push(e).into()),
        }

        let incoming = self.remote.fetch().await?;

        let mut store = self.store.lock().await;
        let added = store.merge_remote(incoming)?;
        if added == 0 {
            return Ok(SyncOutcome::NoChange);
        }

        Ok(SyncOutcome::Synced {
            added,
            categories: store.categories(),
        })
    }

    fn post(&self, message: impl Into<String>, tone: StatusTone) {
        if let Some(ref status) = self.status {
            status.post(message, tone);
        }
    }
}
