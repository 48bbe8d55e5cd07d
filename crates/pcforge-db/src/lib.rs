//! # pcforge-db: Database Layer for PCForge
//!
//! SQLite storage for the catalog and per-user carts, using sqlx for async
//! operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PCForge Data Flow                                │
//! │                                                                         │
//! │  Command (load_catalog, add_build_to_cart, ...)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     pcforge-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                │    │  (embedded)  │  │   │
//! │  │   │ SqlitePool    │◄───│ ComponentRepo  │    │ 001_init.sql │  │   │
//! │  │   │               │    │ CartRepo       │    │              │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   <platform data dir>/pcforge.db                                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded schema migrations and [`SchemaStatus`]
//! - [`error`] - Database error types
//! - [`repository`] - Component and cart repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pcforge_core::CatalogProvider;
//! use pcforge_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/pcforge.db")).await?;
//! let catalog = db.components().fetch_catalog().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use migrations::SchemaStatus;
pub use pool::{Database, DbConfig};

pub use repository::cart::CartRepository;
pub use repository::component::ComponentRepository;
