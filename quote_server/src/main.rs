//! Quote HTTP server.
//!
//! This binary serves the latest USD-BRL bid on `GET /cotacao`. Each request goes through
//! two deadline-bounded hops:
//!
//! - `HttpQuoteFetcher` — calls the upstream quote API (200ms budget) and extracts the
//!   `USDBRL` entry.
//! - `SqliteQuoteStore` — appends the bid to the `cotacoes` table (10ms budget).
//!
//! The handler in `service` answers `{"bid": ...}` when both hops succeed and a flat 500
//! `{"error", "message"}` envelope otherwise. A failing request never takes the process down.
//!
//! Startup opens (or creates) `./cotacoes.db`, ensures the table exists, builds the router
//! with the injected fetcher and store, and listens on `0.0.0.0:8080` until Ctrl+C.
#![warn(missing_docs)]
use std::sync::Arc;

use log::{error, info};
use quote_common::Result;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::fetcher::HttpQuoteFetcher;
use crate::service::{AppState, router};
use crate::store::SqliteQuoteStore;

mod config;
mod fetcher;
mod service;
mod store;
#[cfg(test)]
mod test_support;

#[tokio::main]
async fn main() -> Result<()> {
    init_logger();
    let config = ServerConfig::default();

    let store =
        Arc::new(SqliteQuoteStore::connect(&config.database_path, config.store_timeout).await?);
    info!("Database ready with {} stored quotes", store.count().await?);

    let fetcher = Arc::new(HttpQuoteFetcher::new(
        &config.upstream_url,
        &config.pair_key,
        config.fetch_timeout,
    )?);
    let app = router(AppState::new(fetcher, store.clone()));

    let listener = TcpListener::bind(&config.bind_address).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Ctrl+C received. Shutting down server..."),
        Err(e) => {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
