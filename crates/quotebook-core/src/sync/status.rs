//! User-visible sync status
//!
//! A single ephemeral message with a tone. Each posted message clears itself
//! after a fixed delay unless a newer message has replaced it in the
//! meantime.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::debug;

/// Default time a message stays visible
pub const DEFAULT_CLEAR_AFTER: Duration = Duration::from_secs(5);

/// How a status message should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Success,
    Neutral,
}

/// A status message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub message: String,
    pub tone: StatusTone,
    pub posted_at: DateTime<Utc>,
}

/// Shared handle to the current status message
#[derive(Debug, Clone)]
pub struct StatusBoard {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    tx: watch::Sender<Option<StatusMessage>>,
    generation: AtomicU64,
    clear_after: Duration,
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new(DEFAULT_CLEAR_AFTER)
    }
}

impl StatusBoard {
    /// Create a board whose messages clear after `clear_after`
    pub fn new(clear_after: Duration) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                tx,
                generation: AtomicU64::new(0),
                clear_after,
            }),
        }
    }

    /// Show a message, replacing the current one
    ///
    /// The auto-clear timer needs a Tokio runtime; without one the message
    /// stays until replaced or cleared.
    pub fn post(&self, message: impl Into<String>, tone: StatusTone) {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let message = StatusMessage {
            message: message.into(),
            tone,
            posted_at: Utc::now(),
        };
        debug!("Status: {}", message.message);
        self.inner.tx.send_replace(Some(message));

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let inner = Arc::clone(&self.inner);
        runtime.spawn(async move {
            tokio::time::sleep(inner.clear_after).await;
            if inner.generation.load(Ordering::SeqCst) == generation {
                inner.tx.send_replace(None);
            }
        });
    }

    /// The message currently shown, if any
    pub fn current(&self) -> Option<StatusMessage> {
        self.inner.tx.borrow().clone()
    }

    /// Subscribe to status changes
    pub fn subscribe(&self) -> watch::Receiver<Option<StatusMessage>> {
        self.inner.tx.subscribe()
    }
}
