//! Error types for remote sync.

use thiserror::Error;

/// Result type alias for remote operations.
pub type Result<T> = std::result::Result<T, SyncError>;

/// Errors talking to the remote quote source.
///
/// None of these are fatal: a failed cycle is reported and the next
/// periodic tick simply tries again.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Remote unreachable, timed out, or the connection broke
    #[error("Failed to reach server: {0}")]
    Transport(#[from] reqwest::Error),

    /// Remote answered with a non-success status
    #[error("Server returned {status} for {url}")]
    Status { status: u16, url: String },

    /// Remote answered, but not with a JSON array of items
    #[error("Unexpected server response: {0}")]
    Decode(String),

    /// Pushing the local collection failed, so the cycle was aborted
    #[error("Push failed, skipping fetch: {0}")]
    Push(Box<SyncError>),

    /// Client could not be set up
    #[error("Invalid sync configuration: {0}")]
    Config(String),
}

impl SyncError {
    /// Create a status error from a response status and URL
    pub fn status(status: u16, url: impl Into<String>) -> Self {
        Self::Status {
            status,
            url: url.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Wrap an error raised while pushing
    pub fn push(source: SyncError) -> Self {
        Self::Push(Box::new(source))
    }
}
