//! HTTP surface of the quote server.
//!
//! `router` builds the route table once at startup; the single handler runs the fetch then
//! store sequence and maps any failure to a flat 500 envelope.
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::{error, info};
use quote_common::net::QUOTE_PATH;
use quote_common::{BidResponse, ErrorEnvelope, QuoteError};
use thiserror::Error;

use crate::fetcher::QuoteSource;
use crate::store::QuoteRepository;

/// Collaborators injected into the handler.
#[derive(Clone)]
pub struct AppState {
    source: Arc<dyn QuoteSource>,
    repository: Arc<dyn QuoteRepository>,
}

impl AppState {
    /// Create the handler state from a quote source and a repository.
    pub fn new(source: Arc<dyn QuoteSource>, repository: Arc<dyn QuoteRepository>) -> Self {
        Self { source, repository }
    }
}

/// Failure of one `/cotacao` request, tagged by the stage that failed.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The upstream fetch failed.
    #[error("Failed to get cotacao: {0}")]
    Fetch(#[source] QuoteError),

    /// The bid could not be persisted.
    #[error("Failed to save cotacao to database: {0}")]
    Save(#[source] QuoteError),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let envelope = ErrorEnvelope::internal(self.to_string());
        (StatusCode::INTERNAL_SERVER_ERROR, Json(envelope)).into_response()
    }
}

/// Route table of the quote server.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(QUOTE_PATH, get(get_cotacao))
        .with_state(state)
}

async fn get_cotacao(State(state): State<AppState>) -> Result<Json<BidResponse>, ServiceError> {
    let quote = state.source.fetch().await.map_err(|e| {
        error!("Error in getCotacao: {}", e);
        ServiceError::Fetch(e)
    })?;

    state.repository.save(&quote.bid).await.map_err(|e| {
        error!("Error saving to database: {}", e);
        ServiceError::Save(e)
    })?;

    info!("Served bid {}", quote.bid);
    Ok(Json(BidResponse::new(quote.bid)))
}
