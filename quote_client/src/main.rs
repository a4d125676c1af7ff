//! Quote Client — fetches the current USD-BRL bid from the quote server and appends it to a
//! local record file.
//!
//! One run performs exactly one request (300ms budget by default). On success the line
//! `Dolar: <bid>` is appended to `cotacao.txt`; on any failure a diagnostic is logged, the
//! file is left untouched and the process exits with a non-zero status.
//!
//! Usage example (CLI):
//! ```bash
//! quote_client
//! quote_client --url http://localhost:8080/cotacao --output ./cotacao.txt --timeout-ms 300
//! ```
#![warn(missing_docs)]
mod args;
mod recorder;
mod requester;

use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use quote_common::Result;

use crate::args::Args;
use crate::recorder::append_bid;
use crate::requester::BidRequester;

/// Fetch one bid and record it. Returns the recorded bid.
async fn run(args: &Args) -> Result<String> {
    let requester = BidRequester::new(&args.url, args.timeout())?;
    let response = requester.request().await?;
    append_bid(&args.output, &response.bid).await?;
    Ok(response.bid)
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logger();
    let args = Args::parse();

    match run(&args).await {
        Ok(bid) => {
            info!("Successfully saved bid value: {}", bid);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to record bid: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use quote_common::{ErrorEnvelope, QuoteError};
    use serde_json::json;
    use std::fs;
    use std::net::SocketAddr;
    use std::path::PathBuf;
    use std::time::{Duration, Instant};
    use tokio::net::TcpListener;

    async fn spawn_service(router: Router) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    fn record_file_with(content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("cotacao-{}.txt", uuid::Uuid::new_v4()));
        fs::write(&path, content).unwrap();
        path
    }

    fn args_for(addr: SocketAddr, output: PathBuf) -> Args {
        Args {
            url: format!("http://{}/cotacao", addr),
            output,
            timeout_ms: 300,
        }
    }

    #[tokio::test]
    async fn bid_is_appended_after_existing_lines() {
        let router =
            Router::new().route("/cotacao", get(|| async { Json(json!({ "bid": "5.43" })) }));
        let addr = spawn_service(router).await;
        let output = record_file_with("Dolar: 5.40\n");

        let bid = run(&args_for(addr, output.clone())).await.unwrap();

        assert_eq!(bid, "5.43");
        assert_eq!(fs::read_to_string(&output).unwrap(), "Dolar: 5.40\nDolar: 5.43\n");
        let _ = fs::remove_file(&output);
    }

    #[tokio::test]
    async fn server_error_reports_status_and_writes_nothing() {
        let router = Router::new().route(
            "/cotacao",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorEnvelope::internal("Failed to get cotacao: boom")),
                )
            }),
        );
        let addr = spawn_service(router).await;
        let output = record_file_with("Dolar: 5.40\n");

        let err = run(&args_for(addr, output.clone())).await.unwrap_err();

        assert!(matches!(err, QuoteError::ServerStatus(500)), "{err:?}");
        assert!(err.to_string().contains("500"));
        assert_eq!(fs::read_to_string(&output).unwrap(), "Dolar: 5.40\n");
        let _ = fs::remove_file(&output);
    }

    #[tokio::test]
    async fn status_above_599_is_a_server_error() {
        let status = StatusCode::from_u16(600).unwrap();
        let router = Router::new().route("/cotacao", get(move || async move { (status, "oops") }));
        let addr = spawn_service(router).await;
        let output = record_file_with("Dolar: 5.40\n");

        let err = run(&args_for(addr, output.clone())).await.unwrap_err();

        assert!(matches!(err, QuoteError::ServerStatus(600)), "{err:?}");
        assert!(err.to_string().contains("600"));
        assert_eq!(fs::read_to_string(&output).unwrap(), "Dolar: 5.40\n");
        let _ = fs::remove_file(&output);
    }

    #[tokio::test]
    async fn malformed_body_writes_nothing() {
        let router = Router::new().route("/cotacao", get(|| async { "Dolar" }));
        let addr = spawn_service(router).await;
        let output = std::env::temp_dir().join(format!("cotacao-{}.txt", uuid::Uuid::new_v4()));

        let err = run(&args_for(addr, output.clone())).await.unwrap_err();

        assert!(matches!(err, QuoteError::Decode(_)), "{err:?}");
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn slow_server_times_out_and_writes_nothing() {
        let router = Router::new().route(
            "/cotacao",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(1500)).await;
                Json(json!({ "bid": "5.43" }))
            }),
        );
        let addr = spawn_service(router).await;
        let output = std::env::temp_dir().join(format!("cotacao-{}.txt", uuid::Uuid::new_v4()));

        let started = Instant::now();
        let err = run(&args_for(addr, output.clone())).await.unwrap_err();

        assert!(err.is_timeout(), "{err:?}");
        assert!(started.elapsed() < Duration::from_millis(1000));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let output = std::env::temp_dir().join(format!("cotacao-{}.txt", uuid::Uuid::new_v4()));

        let err = run(&args_for(addr, output.clone())).await.unwrap_err();

        assert!(matches!(err, QuoteError::Transport(_)), "{err:?}");
        assert!(!output.exists());
    }
}
