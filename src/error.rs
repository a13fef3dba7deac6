//! Error types for fetching pages, the article store and sentiment scoring.
//!
//! Fetch failures never abort a scrape. They are caught where they happen,
//! logged, and turned into a [`SkipReason`](crate::models::SkipReason) for the
//! affected candidate. Store errors are reported to the command layer, which
//! decides whether they are fatal.

use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// A failed page request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// Connection, TLS, DNS or body decoding failure.
    #[error("network error for {url}: {message}")]
    Network { url: String, message: String },

    /// The server answered with a non-2xx status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// No complete response within the per-request timeout.
    #[error("{url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },
}

impl FetchError {
    pub fn network(url: &str, err: impl std::fmt::Display) -> Self {
        FetchError::Network {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

/// Errors raised by the JSON article store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Lookup by identifier found nothing.
    #[error("news {0} not found")]
    NotFound(Uuid),
}

#[derive(Debug, Error)]
pub enum SentimentError {
    /// A sentence scoring task panicked or was cancelled.
    #[error("sentence scoring task failed: {0}")]
    Scoring(#[from] tokio::task::JoinError),
}
