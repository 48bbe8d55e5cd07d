//! # PCForge Configurator
//!
//! Orchestration layer between the storefront and the core crates.
//!
//! ## Module Organization
//! ```text
//! pcforge_configurator/
//! ├── lib.rs          ◄─── You are here (startup, logging)
//! ├── main.rs         ◄─── `pcforge` CLI
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── AppConfig (PCFORGE_* environment)
//! │   ├── db.rs       ◄─── Database state wrapper
//! │   └── session.rs  ◄─── Build session behind a mutex
//! ├── commands/
//! │   ├── configurator.rs ◄─── Build session commands
//! │   ├── cart.rs         ◄─── Cart commands
//! │   └── catalog.rs      ◄─── Catalogue and product editor
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod state;

use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::configurator::{load_catalog, BuildResponse};
use error::ApiError;
use state::{AppConfig, DbState, SessionState};

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,pcforge=debug,sqlx=warn";

/// Everything a command may ask for.
#[derive(Debug, Clone)]
pub struct App {
    pub config: AppConfig,
    pub db: DbState,
    pub session: SessionState,
}

impl App {
    /// Opens the database and loads the catalog into a fresh session.
    ///
    /// ## Startup Sequence
    /// ```text
    /// AppConfig ──► database_path() ──► Database::new (migrations)
    ///                                        │
    ///                                        ▼
    ///                      components().fetch_catalog() ──► SessionState
    /// ```
    pub async fn start(config: AppConfig) -> Result<(App, BuildResponse), ApiError> {
        info!(store = %config.store_name, "Starting configurator");

        let db = DbState::open(&config).await?;
        let schema = db.inner().schema();
        info!(
            applied = schema.applied,
            embedded = schema.embedded,
            "Schema migrations checked"
        );

        Self::with_db(config, db).await
    }

    /// Same as [`App::start`] over an already opened database.
    pub async fn with_db(config: AppConfig, db: DbState) -> Result<(App, BuildResponse), ApiError> {
        let session = SessionState::new();
        let loaded = load_catalog(&db.inner().components(), &session).await?;

        Ok((App { config, db, session }, loaded))
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=pcforge=trace` - Trace for the pcforge crates only
/// - Default: [`DEFAULT_LOG_FILTER`]
///
/// Logs go to stderr so command output on stdout stays machine-readable.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcforge_core::{Category, Component, Money};

    #[tokio::test]
    async fn test_start_loads_stored_catalog() {
        let db = DbState::in_memory().await.unwrap();
        db.inner()
            .components()
            .insert(&Component::new(
                "cpu-1",
                "Ryzen 5 7600",
                Category::Cpu,
                Money::from_cents(21900),
            ))
            .await
            .unwrap();

        let (app, loaded) = App::with_db(AppConfig::default(), db).await.unwrap();

        assert!(app.db.inner().schema().is_current());
        assert!(loaded.notices.is_empty());
        assert_eq!(loaded.build.slots[0].options.len(), 1);
        let catalog_size = app.session.with_session(|s| s.catalog().len()).unwrap();
        assert_eq!(catalog_size, 1);
    }
}
