//! JSON payloads shared by the server and the client.
//!
//! `Quote` mirrors the upstream API entry; `BidResponse` and `ErrorEnvelope` are
//! the two bodies the quote service can answer with.
use serde::{Deserialize, Serialize};

/// Error label used in every failure envelope returned by the service.
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// Currency quote as returned by the upstream API. Every field is textual.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Base currency code (e.g., `USD`).
    pub code: String,
    /// Counter currency code (e.g., `BRL`).
    pub codein: String,
    /// Human readable pair name.
    pub name: String,
    /// Session high.
    pub high: String,
    /// Session low.
    pub low: String,
    /// Absolute variation of the bid.
    #[serde(rename = "varBid")]
    pub var_bid: String,
    /// Percentage change.
    #[serde(rename = "pctChange")]
    pub pct_change: String,
    /// Purchase price; the only field propagated downstream.
    pub bid: String,
    /// Sale price.
    pub ask: String,
    /// Unix timestamp as sent by the provider.
    pub timestamp: String,
    /// Provider-side creation date.
    pub create_date: String,
}

/// Successful body of `GET /cotacao`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidResponse {
    /// Latest bid value.
    pub bid: String,
}

impl BidResponse {
    /// Creates a response carrying `bid`.
    pub fn new(bid: impl Into<String>) -> Self {
        Self { bid: bid.into() }
    }
}

/// Failure body of `GET /cotacao`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Short error label.
    pub error: String,
    /// Detailed message embedding the cause.
    pub message: String,
}

impl ErrorEnvelope {
    /// Builds the generic 500 envelope around `message`.
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            error: String::from(INTERNAL_SERVER_ERROR),
            message: message.into(),
        }
    }
}
