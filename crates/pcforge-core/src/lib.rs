//! # pcforge-core: Pure Business Logic for PCForge
//!
//! This crate is the **heart** of the PCForge storefront. It holds the
//! configurator's compatibility engine and the cart math as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PCForge Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (web storefront)                    │   │
//! │  │   Catalogue ──► Configurator ──► Cart ──► Admin editor          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    configurator app (commands)                  │   │
//! │  │   select_component, add_build_to_cart, browse_catalog, ...      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pcforge-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │  types  │ │ compat  │ │  build  │ │  cart   │ │validation│ │   │
//! │  │   │Component│ │ options │ │ Session │ │  Cart   │ │  forms  │  │   │
//! │  │   │Category │ │ power   │ │  View   │ │ Totals  │ │         │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │ repository traits                      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    pcforge-db (SQLite)                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Component, Category and the compatibility attribute bag
//! - [`money`] - Euro amounts in integer cents
//! - [`catalog`] - Catalog snapshot and catalogue filter
//! - [`compat`] - Option sets, power estimate, cascade pruning
//! - [`build`] - Build session and composite cart line
//! - [`cart`] - Cart lines, merging, shipping
//! - [`validation`] - Admin form and cart input checks
//! - [`repository`] - Storage seams
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use pcforge_core::{
//!     BuildSession, Catalog, Category, Compatibility, Component, GpuSpec, Money,
//!     ProcessorSpec, Socket,
//! };
//!
//! let catalog = Catalog::new(vec![
//!     Component::new("cpu", "Ryzen 7 7700X", Category::Cpu, Money::from_cents(32900))
//!         .with_compatibility(Compatibility::Cpu(ProcessorSpec {
//!             socket: Socket::Am5,
//!             tdp_watts: Some(125),
//!         })),
//!     Component::new("gpu", "RTX 4080", Category::Gpu, Money::from_cents(119900))
//!         .with_compatibility(Compatibility::Gpu(GpuSpec {
//!             length_mm: 336,
//!             recommended_psu_watts: 750,
//!         })),
//! ]);
//!
//! let mut session = BuildSession::new(catalog);
//! session.select(Category::Cpu, "cpu").unwrap();
//! session.select(Category::Gpu, "gpu").unwrap();
//!
//! // 125 W + 100 W base + 60% of 750 W
//! assert_eq!(session.power().estimated_watts, 675);
//! assert_eq!(session.total_price().cents(), 152800);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod build;
pub mod cart;
pub mod catalog;
pub mod compat;
pub mod error;
pub mod money;
pub mod repository;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use build::{BuildSession, BuildView, SlotView};
pub use cart::{Cart, CartLine, CartTotals, NewCartLine, ShippingPolicy};
pub use catalog::{Catalog, CatalogQuery};
pub use compat::{
    estimate_power, is_compatible, option_sets, validate_and_prune, Notice, OptionSets,
    PowerReport, SelectedParts, Selection,
};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use repository::{CartStore, CatalogProvider};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines in one cart.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity on a single cart line.
pub const MAX_LINE_QUANTITY: i64 = 99;

/// Shipping is free strictly above this subtotal (100.00 €).
pub const FREE_SHIPPING_THRESHOLD_CENTS: i64 = 10_000;

/// Flat shipping fee below the threshold (9.99 €).
pub const SHIPPING_FEE_CENTS: i64 = 999;

/// Fixed allowance for board, drives and fans in the power estimate.
pub const BASE_SYSTEM_WATTS: u32 = 100;

/// Share of a GPU's recommended PSU rating counted as its draw.
pub const GPU_DRAW_PERCENT: u32 = 60;

/// Default upper bound of the catalogue price filter (3000.00 €).
pub const DEFAULT_MAX_PRICE_CENTS: i64 = 300_000;

/// Name prefix of the composite cart line for a configured PC.
pub const COMPOSITE_BUILD_PREFIX: &str = "PC Gamer Custom";
