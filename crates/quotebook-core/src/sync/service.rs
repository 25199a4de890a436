//! Background sync service
//!
//! Periodic ticks and manual requests are two producers feeding one consumer
//! task, which runs sync cycles one at a time. The caller keeps its own loop
//! responsive and learns about cycles through events.
//!
//! There is no retry or backoff: a failed cycle waits for the next tick.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

use super::cycle::{SyncReport, Syncer};

/// Commands sent to the sync task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncCommand {
    /// Run a cycle now
    SyncNow,
    /// Stop the sync task
    Shutdown,
}

/// What started a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncTrigger {
    Manual,
    Periodic,
}

/// Events emitted by the sync task
#[derive(Debug, Clone)]
pub enum SyncEvent {
    /// A cycle started
    Started(SyncTrigger),
    /// A cycle finished
    Finished(SyncTrigger, SyncReport),
}

/// Handle for controlling the background sync task
pub struct SyncHandle {
    pub command_tx: mpsc::Sender<SyncCommand>,
    pub event_rx: mpsc::Receiver<SyncEvent>,
    task: JoinHandle<()>,
}

impl SyncHandle {
    /// Request a manual cycle
    ///
    /// Returns false if the sync task has stopped.
    pub async fn sync_now(&self) -> bool {
        self.command_tx.send(SyncCommand::SyncNow).await.is_ok()
    }

    /// Stop the sync task and wait for it to finish
    ///
    /// A cycle already in flight is completed first.
    pub async fn shutdown(self) {
        let _ = self.command_tx.send(SyncCommand::Shutdown).await;
        let _ = self.task.await;
    }
}

/// Spawn the sync task
///
/// The first periodic cycle runs one `interval` after spawning.
pub fn spawn_sync_service(syncer: Syncer, interval: Duration) -> SyncHandle {
    let (command_tx, command_rx) = mpsc::channel(16);
    let (event_tx, event_rx) = mpsc::channel(64);

    let task = tokio::spawn(sync_service_task(syncer, interval, command_rx, event_tx));

    SyncHandle {
        command_tx,
        event_rx,
        task,
    }
}

async fn sync_service_task(
    syncer: Syncer,
    interval: Duration,
    mut command_rx: mpsc::Receiver<SyncCommand>,
    event_tx: mpsc::Sender<SyncEvent>,
) {
    let mut ticker = time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let trigger = tokio::select! {
            _ = ticker.tick() => SyncTrigger::Periodic,
            cmd = command_rx.recv() => match cmd {
                Some(SyncCommand::SyncNow) => SyncTrigger::Manual,
                Some(SyncCommand::Shutdown) | None => break,
            },
        };

        debug!("Starting {:?} sync", trigger);
        emit(&event_tx, SyncEvent::Started(trigger));
        let report = syncer.sync().await;
        emit(&event_tx, SyncEvent::Finished(trigger, report));
    }

    debug!("Sync service stopped");
}

/// Events are advisory; a slow or absent listener never stalls syncing
fn emit(event_tx: &mpsc::Sender<SyncEvent>, event: SyncEvent) {
    if let Err(e) = event_tx.try_send(event) {
        debug!("Dropped sync event: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::test_config;
    use crate::models::Quote;
    use crate::store::QuoteStore;
    use crate::sync::cycle::SyncOutcome;
    use crate::sync::testing::FakeRemote;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tokio::sync::Mutex;

    fn syncer(temp_dir: &TempDir, remote: Arc<FakeRemote>) -> Syncer {
        let store = QuoteStore::open_with_seed(test_config(temp_dir), Vec::new()).unwrap();
        Syncer::new(remote, Arc::new(Mutex::new(store)))
    }

    #[tokio::test]
    async fn test_manual_sync() {
        let temp_dir = TempDir::new().unwrap();
        let remote = Arc::new(FakeRemote::returning(vec![Quote::new("a", "Server")]));
        let mut handle = spawn_sync_service(syncer(&temp_dir, remote), Duration::from_secs(3600));

        assert!(handle.sync_now().await);

        let started = handle.event_rx.recv().await.unwrap();
        assert!(matches!(started, SyncEvent::Started(SyncTrigger::Manual)));

        match handle.event_rx.recv().await.unwrap() {
            SyncEvent::Finished(SyncTrigger::Manual, report) => {
                assert!(matches!(report.outcome, SyncOutcome::Synced { added: 1, .. }));
            }
            other => panic!("unexpected event: {:?}", other),
        }

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_periodic_sync() {
        let temp_dir = TempDir::new().unwrap();
        let remote = Arc::new(FakeRemote::returning(vec![Quote::new("a", "Server")]));
        let mut handle =
            spawn_sync_service(syncer(&temp_dir, remote.clone()), Duration::from_secs(30));

        // Nothing happens before the first interval elapses
        tokio::time::sleep(Duration::from_secs(29)).await;
        assert_eq!(remote.fetch_count(), 0);

        let started = handle.event_rx.recv().await.unwrap();
        assert!(matches!(started, SyncEvent::Started(SyncTrigger::Periodic)));
        match handle.event_rx.recv().await.unwrap() {
            SyncEvent::Finished(SyncTrigger::Periodic, report) => assert!(report.changed()),
            other => panic!("unexpected event: {:?}", other),
        }

        // Second tick finds nothing new
        match handle.event_rx.recv().await.unwrap() {
            SyncEvent::Started(SyncTrigger::Periodic) => {}
            other => panic!("unexpected event: {:?}", other),
        }
        match handle.event_rx.recv().await.unwrap() {
            SyncEvent::Finished(_, report) => {
                assert_eq!(report.outcome, SyncOutcome::NoChange)
            }
            other => panic!("unexpected event: {:?}", other),
        }
        assert_eq!(remote.fetch_count(), 2);

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_failed_cycle_keeps_service_running() {
        let temp_dir = TempDir::new().unwrap();
        let remote = Arc::new(FakeRemote::failing_fetch());
        let mut handle =
            spawn_sync_service(syncer(&temp_dir, remote.clone()), Duration::from_secs(3600));

        for _ in 0..2 {
            assert!(handle.sync_now().await);
            handle.event_rx.recv().await.unwrap();
            match handle.event_rx.recv().await.unwrap() {
                SyncEvent::Finished(_, report) => assert!(report.failed()),
                other => panic!("unexpected event: {:?}", other),
            }
        }
        assert_eq!(remote.fetch_count(), 2);

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_shutdown_stops_task() {
        let temp_dir = TempDir::new().unwrap();
        let remote = Arc::new(FakeRemote::returning(Vec::new()));
        let handle = spawn_sync_service(syncer(&temp_dir, remote.clone()), Duration::from_secs(3600));
        let command_tx = handle.command_tx.clone();

        handle.shutdown().await;

        assert!(command_tx.send(SyncCommand::SyncNow).await.is_err());
        assert_eq!(remote.fetch_count(), 0);
    }
}
