//! Remote quote source
//!
//! The remote has no notion of quotes or categories: it returns a JSON array
//! of arbitrary items. The first `limit` items are consumed in order, each
//! item's title-like field becomes the quote text, and every quote gets the
//! same fixed category.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::error::{Result, SyncError};
use crate::config::Config;
use crate::models::Quote;

/// Outcome of a successful push
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushAck {
    /// Remote accepted the collection
    Accepted,
    /// No push endpoint configured; nothing was sent
    Skipped,
}

/// A source of remote quotes
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch the remote collection
    async fn fetch(&self) -> Result<Vec<Quote>>;

    /// Push the local collection outward
    async fn push(&self, quotes: &[Quote]) -> Result<PushAck>;
}

/// Remote source over HTTP
#[derive(Debug, Clone)]
pub struct HttpRemote {
    client: reqwest::Client,
    fetch_url: String,
    push_url: Option<String>,
    limit: usize,
    category: String,
    title_field: String,
}

impl HttpRemote {
    /// Create a remote reading from `fetch_url`
    pub fn new(fetch_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("quotebook/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            fetch_url: fetch_url.into(),
            push_url: None,
            limit: 5,
            category: "Server".to_string(),
            title_field: "title".to_string(),
        })
    }

    /// Create a remote from the configured endpoints and mapping
    pub fn from_config(config: &Config) -> Result<Self> {
        if config.fetch_url.is_empty() {
            return Err(SyncError::Config("fetch_url is not set".to_string()));
        }

        let remote = Self::new(config.fetch_url.clone(), config.request_timeout())?
            .with_limit(config.fetch_limit)
            .with_category(config.server_category.clone())
            .with_title_field(config.title_field.clone());

        Ok(match config.push_url {
            Some(ref push_url) => remote.with_push_url(push_url.clone()),
            None => remote,
        })
    }

    /// Use a preconfigured HTTP client
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Also push the local collection to `push_url` before fetching
    pub fn with_push_url(mut self, push_url: impl Into<String>) -> Self {
        self.push_url = Some(push_url.into());
        self
    }

    /// Number of remote items to consume
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Category assigned to remote quotes
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Item field holding the quote text
    pub fn with_title_field(mut self, field: impl Into<String>) -> Self {
        self.title_field = field.into();
        self
    }
}

#[async_trait]
impl RemoteSource for HttpRemote {
    async fn fetch(&self) -> Result<Vec<Quote>> {
        debug!("Fetching remote quotes from {}", self.fetch_url);
        let response = self.client.get(&self.fetch_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::status(status.as_u16(), &self.fetch_url));
        }

        let body = response.text().await?;
        let value: Value = serde_json::from_str(&body)
            .map_err(|e| SyncError::decode(format!("invalid JSON: {}", e)))?;

        let quotes = quotes_from_items(value, &self.title_field, self.limit, &self.category)?;
        debug!("Fetched {} remote quotes", quotes.len());
        Ok(quotes)
    }

    async fn push(&self, quotes: &[Quote]) -> Result<PushAck> {
        let Some(ref push_url) = self.push_url else {
            return Ok(PushAck::Skipped);
        };

        debug!("Pushing {} quotes to {}", quotes.len(), push_url);
        let response = self.client.post(push_url).json(quotes).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::status(status.as_u16(), push_url));
        }

        Ok(PushAck::Accepted)
    }
}

/// Turn a remote JSON document into quotes
///
/// The document must be an array. Items without a string `title_field` are
/// skipped since they carry no text.
pub fn quotes_from_items(
    value: Value,
    title_field: &str,
    limit: usize,
    category: &str,
) -> Result<Vec<Quote>> {
    let Value::Array(items) = value else {
        return Err(SyncError::decode("expected a JSON array of items"));
    };

    Ok(items
        .into_iter()
        .take(limit)
        .filter_map(|item| match item.get(title_field) {
            Some(Value::String(title)) => Some(Quote::new(title.clone(), category)),
            _ => None,
        })
        .collect())
}
