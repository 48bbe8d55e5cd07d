//! # Catalog Snapshot
//!
//! A read-only snapshot of every product, plus the catalogue page filter.
//!
//! The configurator never mutates the catalog. When the product list
//! changes, callers fetch a fresh snapshot and hand it over whole.
//!
//! ## Catalogue Filter
//! ```text
//! CatalogQuery { search: "rtx", category: Some(gpu), 0 € ..= 3000 € }
//!      │
//!      ├── name contains "rtx" (case-insensitive)?
//!      ├── category == gpu?
//!      └── min_price <= price <= max_price?
//!      │
//!      ▼
//! matching products, catalog order (no ranking)
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Category, Component};
use crate::DEFAULT_MAX_PRICE_CENTS;

/// Immutable list of catalog entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    components: Vec<Component>,
}

impl Catalog {
    pub fn new(components: Vec<Component>) -> Self {
        Catalog { components }
    }

    /// Looks up a component by ID.
    pub fn get(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Components the configurator may offer in `category`, before any
    /// compatibility filtering.
    pub fn offerable(&self, category: Category) -> impl Iterator<Item = &Component> {
        self.components
            .iter()
            .filter(move |c| c.offerable_in(category))
    }

    /// Applies the catalogue page filter.
    pub fn browse(&self, query: &CatalogQuery) -> Vec<&Component> {
        self.components.iter().filter(|c| query.matches(c)).collect()
    }

    pub fn into_components(self) -> Vec<Component> {
        self.components
    }
}

impl From<Vec<Component>> for Catalog {
    fn from(components: Vec<Component>) -> Self {
        Catalog::new(components)
    }
}

// =============================================================================
// Catalogue Query
// =============================================================================

/// Filter for the catalogue page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogQuery {
    /// Case-insensitive substring of the product name. Empty matches all.
    pub search: String,
    /// `None` means every category.
    pub category: Option<Category>,
    pub min_price_cents: i64,
    pub max_price_cents: i64,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        CatalogQuery {
            search: String::new(),
            category: None,
            min_price_cents: 0,
            max_price_cents: DEFAULT_MAX_PRICE_CENTS,
        }
    }
}

impl CatalogQuery {
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn price_range(mut self, min: Money, max: Money) -> Self {
        self.min_price_cents = min.cents();
        self.max_price_cents = max.cents();
        self
    }

    /// Whether a product passes every filter. Price bounds are inclusive.
    pub fn matches(&self, component: &Component) -> bool {
        let needle = self.search.trim().to_lowercase();
        let matches_search = needle.is_empty() || component.name.to_lowercase().contains(&needle);
        let matches_category = self.category.map_or(true, |c| component.category == c);
        let matches_price = component.price_cents >= self.min_price_cents
            && component.price_cents <= self.max_price_cents;

        matches_search && matches_category && matches_price
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
