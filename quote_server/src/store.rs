//! SQLite persistence of fetched bids.
//!
//! Each save is an insert-only append into the `cotacoes` table, inside its own transaction.
//! Begin and insert race the deadline; if the timer wins, the uncommitted transaction is
//! dropped and rolled back. The commit itself is never abandoned mid-flight: connections
//! opened by `connect` carry a `busy_timeout` equal to the deadline, so a commit stuck on a
//! lock fails inside SQLite with `SQLITE_BUSY` and is reported as a timeout with nothing
//! committed. A timed-out save therefore never leaves a row behind.
use std::time::{Duration, Instant};

use async_trait::async_trait;
use log::{debug, info, warn};
use quote_common::{QuoteError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tokio::time::timeout;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS cotacoes (
    id INTEGER PRIMARY KEY,
    bid TEXT
)";
const INSERT_BID: &str = "INSERT INTO cotacoes (bid) VALUES (?)";
const COUNT_BIDS: &str = "SELECT COUNT(*) FROM cotacoes";

/// Primary result codes of a lock wait that gave up.
const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;

/// Destination for fetched bids.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteRepository: Send + Sync {
    /// Append `bid` as a new record. Not idempotent.
    async fn save(&self, bid: &str) -> Result<()>;
}

fn storage_error(err: sqlx::Error) -> QuoteError {
    QuoteError::Storage(err.to_string())
}

fn is_lock_timeout(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db
            .code()
            .and_then(|code| code.parse::<i32>().ok())
            .is_some_and(|code| matches!(code & 0xff, SQLITE_BUSY | SQLITE_LOCKED)),
        _ => false,
    }
}

/// `QuoteRepository` backed by a SQLite connection pool.
pub struct SqliteQuoteStore {
    pool: SqlitePool,
    deadline: Duration,
}

impl SqliteQuoteStore {
    /// Open (creating if missing) the database file at `path` and ensure the table exists.
    ///
    /// Lock waits on these connections give up after `deadline`.
    pub async fn connect(path: &str, deadline: Duration) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Delete)
            .busy_timeout(deadline);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(storage_error)?;

        info!("Opened SQLite database at {}", path);
        Self::from_pool(pool, deadline).await
    }

    /// Wrap an existing pool, checking the connection and creating the table if absent.
    pub async fn from_pool(pool: SqlitePool, deadline: Duration) -> Result<Self> {
        sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .map_err(storage_error)?;
        sqlx::query(CREATE_TABLE)
            .execute(&pool)
            .await
            .map_err(storage_error)?;

        Ok(Self { pool, deadline })
    }

    /// Number of committed records.
    pub async fn count(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(COUNT_BIDS)
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Begin a transaction and insert `bid` without committing.
    async fn stage(
        &self,
        bid: &str,
    ) -> std::result::Result<Transaction<'static, Sqlite>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(INSERT_BID).bind(bid).execute(&mut *tx).await?;
        Ok(tx)
    }

    fn timed_out(&self) -> QuoteError {
        warn!("Database operation timed out after {}ms", self.deadline.as_millis());
        QuoteError::Timeout {
            operation: "database insert",
            after: self.deadline,
        }
    }

    fn classify(&self, err: sqlx::Error) -> QuoteError {
        if is_lock_timeout(&err) {
            self.timed_out()
        } else {
            storage_error(err)
        }
    }
}

#[async_trait]
impl QuoteRepository for SqliteQuoteStore {
    async fn save(&self, bid: &str) -> Result<()> {
        let started = Instant::now();
        let tx = match timeout(self.deadline, self.stage(bid)).await {
            Ok(Ok(tx)) => tx,
            Ok(Err(e)) => return Err(self.classify(e)),
            Err(_) => return Err(self.timed_out()),
        };

        if started.elapsed() >= self.deadline {
            if let Err(e) = tx.rollback().await {
                debug!("Rollback after deadline failed: {}", e);
            }
            return Err(self.timed_out());
        }

        // Awaited to completion: once COMMIT is sent its outcome is what gets reported.
        tx.commit().await.map_err(|e| self.classify(e))?;
        debug!("Stored bid {}", bid);
        Ok(())
    }
}
