//! # Connection Pool
//!
//! Opens the store database and hands out repositories that share one
//! `SqlitePool`.
//!
//! ```text
//! DbConfig::new(path) ──► Database::new ──► migrate ──► components() / cart()
//! DbConfig::in_memory() ─┘  (single connection, lives as long as the pool)
//! ```
//!
//! File databases use WAL journaling so catalogue reads never wait on a cart
//! write.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::migrations::{self, SchemaStatus};
use crate::repository::cart::CartRepository;
use crate::repository::component::ComponentRepository;

const MEMORY_URL: &str = "sqlite::memory:";

/// Where the database lives and how many connections may be open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    /// `None` for an in-memory database.
    pub path: Option<PathBuf>,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DbConfig {
    /// A database file, created on first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            path: Some(path.into()),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
        }
    }

    /// A throwaway database for tests. Every `Database::new` gets a fresh one.
    pub fn in_memory() -> Self {
        DbConfig {
            path: None,
            max_connections: 1,
            acquire_timeout: Duration::from_secs(5),
        }
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = match &self.path {
            Some(path) => SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal),
            None => SqliteConnectOptions::from_str(MEMORY_URL)
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?,
        };

        Ok(options
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true))
    }
}

/// An open, migrated store database.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
    schema: SchemaStatus,
}

impl Database {
    /// Connects and brings the schema up to date.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        let options = config.connect_options()?;

        // An in-memory database is dropped with its last connection.
        let recycle = config.path.is_some();
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(recycle.then_some(Duration::from_secs(600)))
            .max_lifetime(recycle.then_some(Duration::from_secs(30 * 60)))
            .connect_with(options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        let schema = migrations::migrate(&pool).await?;

        info!(
            path = ?config.path,
            max_connections = config.max_connections,
            "Database ready"
        );
        Ok(Database { pool, schema })
    }

    /// Migration state observed when the database was opened.
    pub fn schema(&self) -> SchemaStatus {
        self.schema
    }

    pub fn components(&self) -> ComponentRepository {
        ComponentRepository::new(self.pool.clone())
    }

    pub fn cart(&self) -> CartRepository {
        CartRepository::new(self.pool.clone())
    }
}
