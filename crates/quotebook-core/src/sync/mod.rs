//! Remote sync
//!
//! Best-effort reconciliation with a remote quote source over HTTP.
//!
//! ## Cycle
//!
//! 1. Push the local collection (only if a push endpoint is configured;
//!    a failed push aborts the cycle)
//! 2. Fetch the remote collection
//! 3. Merge it into the store, saving only if something was added
//! 4. Report `Synced`, `NoChange` or `Failed` and update the status board
//!
//! ## Usage
//!
//! ```ignore
//! let remote = Arc::new(HttpRemote::from_config(&config)?);
//! let syncer = Syncer::new(remote, store.clone()).with_status(board);
//! let handle = spawn_sync_service(syncer, config.sync_interval());
//! handle.sync_now().await;
//! ```

mod cycle;
mod error;
mod remote;
mod service;
mod status;

#[cfg(test)]
pub(crate) mod testing;

pub use cycle::{SharedStore, SyncOutcome, SyncReport, Syncer};
pub use error::SyncError;
pub use remote::{quotes_from_items, HttpRemote, PushAck, RemoteSource};
pub use service::{spawn_sync_service, SyncCommand, SyncEvent, SyncHandle, SyncTrigger};
pub use status::{StatusBoard, StatusMessage, StatusTone, DEFAULT_CLEAR_AFTER};
