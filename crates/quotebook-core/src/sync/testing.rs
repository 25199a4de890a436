//! In-memory remote for tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use super::error::{Result, SyncError};
use super::remote::{PushAck, RemoteSource};
use crate::models::Quote;

const FAKE_URL: &str = "fake://remote";

#[derive(Debug, Default)]
pub(crate) struct FakeRemote {
    quotes: Vec<Quote>,
    fail_fetch: bool,
    fail_push: bool,
    accept_push: bool,
    fetches: AtomicUsize,
    pushed: Mutex<Vec<Vec<Quote>>>,
    gate: Option<Arc<Notify>>,
}

impl FakeRemote {
    pub(crate) fn returning(quotes: Vec<Quote>) -> Self {
        Self {
            quotes,
            ..Self::default()
        }
    }

    pub(crate) fn failing_fetch() -> Self {
        Self {
            fail_fetch: true,
            ..Self::default()
        }
    }

    pub(crate) fn failing_push(mut self) -> Self {
        self.fail_push = true;
        self
    }

    pub(crate) fn accepting_push(mut self) -> Self {
        self.accept_push = true;
        self
    }

    /// Hold every fetch until `gate` is notified
    pub(crate) fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub(crate) fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub(crate) fn pushed(&self) -> Vec<Vec<Quote>> {
        self.pushed.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteSource for FakeRemote {
    async fn fetch(&self) -> Result<Vec<Quote>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(ref gate) = self.gate {
            gate.notified().await;
        }
        if self.fail_fetch {
            return Err(SyncError::status(503, FAKE_URL));
        }
        Ok(self.quotes.clone())
    }

    async fn push(&self, quotes: &[Quote]) -> Result<PushAck> {
        if self.fail_push {
            return Err(SyncError::status(500, FAKE_URL));
        }
        if !self.accept_push {
            return Ok(PushAck::Skipped);
        }
        self.pushed.lock().unwrap().push(quotes.to_vec());
        Ok(PushAck::Accepted)
    }
}
