//!
//! Common types and utilities shared by the quote server and client.
//!
//! This crate aggregates:
//! - `error` — unified error type `QuoteError` used across the workspace.
//! - `result` — handy `Result<T, QuoteError>` alias.
//! - `model` — JSON payloads exchanged with the upstream API and between server and client.
//! - `net` — ports, endpoints, deadlines and file names shared by both binaries.
#![warn(missing_docs)]
pub mod error;
pub mod model;
pub mod net;
pub mod result;

pub use error::QuoteError;
pub use model::{BidResponse, ErrorEnvelope, Quote};
pub use result::Result;
