//! Calling the quote service.
//!
//! `BidRequester` performs a single GET against the service, racing the request and the
//! body read against one deadline. Any status of 500 or above is reported by its code
//! without touching the body.
use std::time::Duration;

use log::debug;
use quote_common::{BidResponse, QuoteError, Result};
use reqwest::Client;
use tokio::time::timeout;

/// One-shot HTTP client for `GET /cotacao`.
pub struct BidRequester {
    client: Client,
    url: String,
    deadline: Duration,
}

impl BidRequester {
    /// Creates a requester for `url` bounded by `deadline`.
    pub fn new(url: &str, deadline: Duration) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| QuoteError::Transport(format!("Error creating client: {}", e)))?;

        Ok(Self {
            client,
            url: String::from(url),
            deadline,
        })
    }

    /// Fetch the current bid. Single attempt, no retries.
    pub async fn request(&self) -> Result<BidResponse> {
        match timeout(self.deadline, self.exchange()).await {
            Ok(result) => result,
            Err(_) => Err(QuoteError::Timeout {
                operation: "server request",
                after: self.deadline,
            }),
        }
    }

    async fn exchange(&self) -> Result<BidResponse> {
        let request = self
            .client
            .get(&self.url)
            .build()
            .map_err(|e| QuoteError::Transport(format!("Error creating request: {}", e)))?;

        debug!("GET {}", request.url());
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| QuoteError::Transport(format!("Error executing request: {}", e)))?;

        let status = response.status();
        if status.as_u16() >= 500 {
            return Err(QuoteError::ServerStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| QuoteError::Decode(format!("Error reading response body: {}", e)))?;
        let bid: BidResponse = serde_json::from_slice(&body)?;
        if bid.bid.is_empty() {
            return Err(QuoteError::Decode(String::from("empty bid in response")));
        }
        Ok(bid)
    }
}
