//! Command-line arguments for the Quote Client.
//!
//! Every flag defaults to the fixed deployment values, so running the binary without
//! arguments calls `http://localhost:8080/cotacao` and appends to `cotacao.txt`.
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use quote_common::net::{CLIENT_TIMEOUT, RECORD_PATH, service_url};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// URL of the quote service endpoint.
    #[clap(long, default_value_t = service_url())]
    pub url: String,

    /// Record file the bid line is appended to.
    #[clap(long, default_value = RECORD_PATH)]
    pub output: PathBuf,

    /// Deadline for the whole request, in milliseconds.
    #[clap(long, default_value_t = CLIENT_TIMEOUT.as_millis() as u64)]
    pub timeout_ms: u64,
}

impl Args {
    /// Request deadline as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_fixed_deployment() {
        let args = Args::parse_from(["quote_client"]);
        assert_eq!(args.url, "http://localhost:8080/cotacao");
        assert_eq!(args.output, PathBuf::from("cotacao.txt"));
        assert_eq!(args.timeout(), Duration::from_millis(300));
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "quote_client",
            "--url",
            "http://127.0.0.1:9000/cotacao",
            "--output",
            "/tmp/bids.txt",
            "--timeout-ms",
            "50",
        ]);
        assert_eq!(args.url, "http://127.0.0.1:9000/cotacao");
        assert_eq!(args.output, PathBuf::from("/tmp/bids.txt"));
        assert_eq!(args.timeout(), Duration::from_millis(50));
    }
}
