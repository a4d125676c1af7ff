//! Upstream quote fetcher.
//!
//! `QuoteSource` is the seam the HTTP handler depends on; `HttpQuoteFetcher` is the
//! production implementation that calls the public quote API with `reqwest`. The whole
//! exchange (request and body read) races a single deadline so a slow upstream surfaces
//! as `QuoteError::Timeout` instead of stalling the handler.
use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use quote_common::{Quote, QuoteError, Result};
use reqwest::{Client, StatusCode};
use tokio::time::timeout;

/// Source of the latest quote.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch a fresh quote. Single attempt, no retries.
    async fn fetch(&self) -> Result<Quote>;
}

/// Fetches quotes from an HTTP endpoint returning a map keyed by currency pair.
pub struct HttpQuoteFetcher {
    client: Client,
    url: String,
    pair_key: String,
    deadline: Duration,
}

impl HttpQuoteFetcher {
    /// Creates a fetcher for `url` that reads the `pair_key` entry under `deadline`.
    pub fn new(url: &str, pair_key: &str, deadline: Duration) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| QuoteError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: String::from(url),
            pair_key: String::from(pair_key),
            deadline,
        })
    }

    async fn request(&self) -> Result<Quote> {
        debug!("GET {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| QuoteError::Transport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(QuoteError::UpstreamStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| QuoteError::Decode(e.to_string()))?;
        let mut quotes: HashMap<String, Quote> = serde_json::from_slice(&body)?;

        let quote = quotes
            .remove(self.pair_key.as_str())
            .ok_or_else(|| QuoteError::MissingKey(self.pair_key.clone()))?;
        if quote.bid.is_empty() {
            return Err(QuoteError::Decode(format!("empty bid for {}", self.pair_key)));
        }
        Ok(quote)
    }
}

#[async_trait]
impl QuoteSource for HttpQuoteFetcher {
    async fn fetch(&self) -> Result<Quote> {
        match timeout(self.deadline, self.request()).await {
            Ok(result) => result,
            Err(_) => {
                warn!("API request timed out after {}ms", self.deadline.as_millis());
                Err(QuoteError::Timeout {
                    operation: "quote API request",
                    after: self.deadline,
                })
            }
        }
    }
}
