//! # Repository Module
//!
//! Database repository implementations for PCForge.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Command                                                                │
//! │       │                                                                 │
//! │       │  db.components().fetch_catalog()                               │
//! │       ▼                                                                 │
//! │  ComponentRepository          CartRepository                            │
//! │  ├── list / list_by_category  ├── load(user)                            │
//! │  ├── get_by_id                ├── add(user, line)                       │
//! │  ├── insert / update          ├── set_quantity / remove                 │
//! │  └── delete / count           └── clear(user)                           │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! │                                                                         │
//! │  Both implement the pcforge-core storage traits                         │
//! │  (CatalogProvider, CartStore), so callers can swap in fakes.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod component;
