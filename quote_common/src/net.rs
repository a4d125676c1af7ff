//! Shared networking constants and helpers used by client and server.
use std::time::Duration;

/// TCP port the quote service listens on.
pub const SERVER_PORT: u16 = 8080;
/// Path of the only route exposed by the quote service.
pub const QUOTE_PATH: &str = "/cotacao";
/// Upstream endpoint returning the latest USD-BRL quote.
pub const UPSTREAM_URL: &str = "https://economia.awesomeapi.com.br/json/last/USD-BRL";
/// Key of the USD-BRL entry in the upstream response map.
pub const PAIR_KEY: &str = "USDBRL";

/// Deadline for the server's call to the upstream API.
pub const FETCH_TIMEOUT: Duration = Duration::from_millis(200);
/// Deadline for the server's database insert.
pub const STORE_TIMEOUT: Duration = Duration::from_millis(10);
/// Deadline for the client's call to the quote service.
pub const CLIENT_TIMEOUT: Duration = Duration::from_millis(300);

/// SQLite file used by the server.
pub const DATABASE_PATH: &str = "./cotacoes.db";
/// Record file appended to by the client.
pub const RECORD_PATH: &str = "cotacao.txt";

/// Helper to format an IPv4 address with a port like "ip:port".
pub fn addr(ip: &str, port: u16) -> String {
    format!("{}:{}", ip, port)
}

/// Default URL of the quote service as seen from the client.
pub fn service_url() -> String {
    format!("http://{}{}", addr("localhost", SERVER_PORT), QUOTE_PATH)
}
