//! Append-only record file of fetched bids.
use std::path::Path;

use quote_common::Result;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

/// Line written for `bid`, newline included.
pub fn format_record(bid: &str) -> String {
    format!("Dolar: {}\n", bid)
}

/// Append one record line to `path`, creating the file if absent. Never truncates.
pub async fn append_bid(path: &Path, bid: &str) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path).await?;
    file.write_all(format_record(bid).as_bytes()).await?;
    file.flush().await?;
    Ok(())
}
