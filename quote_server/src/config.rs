//! Runtime settings of the quote server.
use std::time::Duration;

use quote_common::net::{
    DATABASE_PATH, FETCH_TIMEOUT, PAIR_KEY, SERVER_PORT, STORE_TIMEOUT, UPSTREAM_URL, addr,
};

/// Addresses, paths and deadlines used to wire the server together.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address the HTTP server binds to.
    pub bind_address: String,
    /// Upstream quote endpoint.
    pub upstream_url: String,
    /// Key of the currency pair in the upstream response.
    pub pair_key: String,
    /// SQLite database file.
    pub database_path: String,
    /// Deadline for the upstream call.
    pub fetch_timeout: Duration,
    /// Deadline for the database insert.
    pub store_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: addr("0.0.0.0", SERVER_PORT),
            upstream_url: String::from(UPSTREAM_URL),
            pair_key: String::from(PAIR_KEY),
            database_path: String::from(DATABASE_PATH),
            fetch_timeout: FETCH_TIMEOUT,
            store_timeout: STORE_TIMEOUT,
        }
    }
}
