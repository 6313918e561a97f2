//! SQLite pooling for the chat store.
//!
//! Two pools over one database file: several read-only connections for
//! transcript and listing queries, and a single write connection so
//! SQLite's one-writer rule is enforced at the pool level rather than
//! through lock contention. WAL mode keeps readers unblocked during
//! writes.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use crate::config;

/// Read connections kept open; writes never need more than one.
const READ_CONNECTIONS: u32 = 8;

/// How long a connection waits on a locked database before erroring.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Reader/writer pool pair for one SQLite database.
#[derive(Clone)]
pub struct DatabasePool {
    pub reader: SqlitePool,
    pub writer: SqlitePool,
}

impl DatabasePool {
    /// Open the pools and bring the schema up to date.
    ///
    /// Migrations run on the writer before the reader pool opens, so a
    /// read-only connection never observes a missing table. Both pools
    /// use WAL mode and enforce foreign keys.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let opts = SqliteConnectOptions::from_str(database_url)?
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT)
            .create_if_missing(true);

        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(opts.clone())
            .await?;

        sqlx::migrate!("../../migrations").run(&writer).await?;
        tracing::debug!("database migrations applied");

        let reader = SqlitePoolOptions::new()
            .max_connections(READ_CONNECTIONS)
            .connect_with(opts.read_only(true))
            .await?;

        Ok(Self { reader, writer })
    }

    /// Open the database at its default location under the data
    /// directory (see [`config::data_dir`]).
    pub async fn open_default() -> Result<Self, sqlx::Error> {
        Self::new(&config::default_database_url()).await
    }
}
