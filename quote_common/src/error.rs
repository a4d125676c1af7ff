//! Error types shared between client and server.
//!
//! `QuoteError` covers every way a hop of the quote chain can fail: the server
//! fetching from the upstream API, the server writing to SQLite, and the client
//! calling the server and writing its record file.
use std::io;
use std::time::Duration;

use thiserror::Error;

/// Unified error type shared by client and server.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// A deadline-bounded call did not complete in time.
    #[error("{operation} timed out after {}ms", .after.as_millis())]
    Timeout {
        /// Short name of the operation that expired.
        operation: &'static str,
        /// The deadline that was exceeded.
        after: Duration,
    },

    /// The request could not be built or the connection failed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The upstream quote API answered with something other than 200.
    #[error("unexpected status code from API: {0}")]
    UpstreamStatus(u16),

    /// The upstream payload parsed but the currency pair entry is absent.
    #[error("key {0} does not exist in the response map")]
    MissingKey(String),

    /// The body could not be read or is not the expected JSON.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Persistence failure other than a timeout.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The quote service answered with a 5xx status.
    #[error("Server error: {0}. An error occurred while processing the request")]
    ServerStatus(u16),

    /// I/O error originating from sockets or files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl QuoteError {
    /// Returns `true` for deadline expirations.
    pub fn is_timeout(&self) -> bool {
        matches!(self, QuoteError::Timeout { .. })
    }
}

impl From<serde_json::Error> for QuoteError {
    fn from(err: serde_json::Error) -> Self {
        QuoteError::Decode(err.to_string())
    }
}
