//! Helpers shared by the server's tests: local stand-ins for the upstream API and
//! SQLite lock holders.
use std::net::SocketAddr;
use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use sqlx::Connection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteJournalMode};
use tokio::net::TcpListener;

/// Path the stub upstream serves, mirroring the real provider.
pub const UPSTREAM_PATH: &str = "/json/last/USD-BRL";

/// Serve `router` on an ephemeral local port and return its address.
pub async fn spawn_stub(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Upstream payload carrying `bid` under the `USDBRL` key.
pub fn upstream_body(bid: &str) -> Value {
    json!({
        "USDBRL": {
            "code": "USD",
            "codein": "BRL",
            "name": "Dólar Americano/Real Brasileiro",
            "high": "5.4712",
            "low": "5.4211",
            "varBid": "0.0131",
            "pctChange": "0.24",
            "bid": bid,
            "ask": "5.4311",
            "timestamp": "1718042399",
            "create_date": "2024-06-10 14:59:59"
        }
    })
}

/// Upstream stub answering `status` with `body` after `delay`.
pub fn upstream_router(status: StatusCode, body: Value, delay: Duration) -> Router {
    Router::new().route(
        UPSTREAM_PATH,
        get(move || {
            let body = body.clone();
            async move {
                tokio::time::sleep(delay).await;
                (status, Json(body))
            }
        }),
    )
}

/// Fresh SQLite file path under the system temp directory.
pub fn temp_db_path() -> String {
    std::env::temp_dir()
        .join(format!("cotacoes-{}.db", uuid::Uuid::new_v4()))
        .to_string_lossy()
        .into_owned()
}

/// Open a separate connection to `path` and run `begin` on it, keeping its lock.
pub async fn hold_lock(path: &str, begin: &str) -> SqliteConnection {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .journal_mode(SqliteJournalMode::Delete);
    let mut conn = SqliteConnection::connect_with(&options).await.unwrap();
    sqlx::query(begin).execute(&mut conn).await.unwrap();
    conn
}

/// End the transaction opened by `hold_lock` and count the committed rows.
pub async fn release_and_count(conn: &mut SqliteConnection) -> i64 {
    sqlx::query("COMMIT").execute(&mut *conn).await.unwrap();
    sqlx::query_scalar("SELECT COUNT(*) FROM cotacoes")
        .fetch_one(&mut *conn)
        .await
        .unwrap()
}
