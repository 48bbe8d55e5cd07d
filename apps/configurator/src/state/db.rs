//! # Database State
//!
//! Wraps the `Database` connection for use in commands.
//!
//! The `Database` from `pcforge-db` holds a `SqlitePool`, so commands can run
//! queries concurrently without extra locking.

use pcforge_db::{Database, DbConfig};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppConfig;

#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Opens the configured database and applies pending migrations.
    pub async fn open(config: &AppConfig) -> Result<Self, ApiError> {
        let path = config.database_path()?;
        info!(db_path = %path.display(), "Opening database");

        let db = Database::new(DbConfig::new(path)).await?;
        Ok(DbState::new(db))
    }

    /// Fresh in-memory database with migrations applied.
    pub async fn in_memory() -> Result<Self, ApiError> {
        let db = Database::new(DbConfig::in_memory()).await?;
        Ok(DbState::new(db))
    }

    pub fn inner(&self) -> &Database {
        &self.db
    }
}
