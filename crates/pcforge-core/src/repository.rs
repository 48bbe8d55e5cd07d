//! # Repository Interfaces
//!
//! The two seams between the engine and storage. `pcforge-db` implements
//! both over SQLite; tests use in-memory fakes.
//!
//! ```text
//!   CatalogProvider::fetch_catalog() ──► Catalog ──► BuildSession
//!
//!   BuildSession::composite_line() ──► CartStore::add_cart_line(user, line)
//! ```

use std::convert::Infallible;
use std::future::{ready, Future};

use crate::cart::{CartLine, NewCartLine};
use crate::catalog::Catalog;

/// Source of catalog snapshots.
pub trait CatalogProvider {
    type Error;

    /// Returns every product, configurable or not.
    fn fetch_catalog(&self) -> impl Future<Output = Result<Catalog, Self::Error>> + Send;
}

/// Persistent per-user cart.
pub trait CartStore {
    type Error;

    /// Adds a line to the user's cart, merging with an existing line of the
    /// same product name and unit price.
    fn add_cart_line(
        &self,
        user_id: &str,
        line: NewCartLine,
    ) -> impl Future<Output = Result<CartLine, Self::Error>> + Send;
}

/// A snapshot already in memory serves itself.
impl CatalogProvider for Catalog {
    type Error = Infallible;

    fn fetch_catalog(&self) -> impl Future<Output = Result<Catalog, Self::Error>> + Send {
        ready(Ok(self.clone()))
    }
}
