//! # Cart
//!
//! Per-user shopping cart math: line merging, quantity updates and totals
//! with the shipping rule.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Action               Method                 Effect                     │
//! │  ──────               ──────                 ──────                     │
//! │  Add to cart ───────► add_line() ──────────► merge on name and price   │
//! │                                               or push a new line        │
//! │  Change quantity ───► set_quantity() ──────► qty <= 0 removes the line │
//! │  Remove ────────────► remove_line()                                     │
//! │  Empty cart ────────► clear()                                           │
//! │  Summary ───────────► totals(&ShippingPolicy)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines freeze name, image and unit price when added. A product edited later
//! does not reprice the cart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Component;
use crate::validation::validate_new_cart_line;
use crate::{FREE_SHIPPING_THRESHOLD_CENTS, MAX_CART_LINES, MAX_LINE_QUANTITY, SHIPPING_FEE_CENTS};

// =============================================================================
// Cart Lines
// =============================================================================

/// A stored cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: String,

    /// Product name at time of adding.
    pub product_name: String,

    pub image_url: Option<String>,

    /// Unit price in cents at time of adding.
    pub unit_price_cents: i64,

    pub quantity: i64,

    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Whether adding `line` increases this line's quantity.
    pub fn merges_with(&self, line: &NewCartLine) -> bool {
        self.product_name == line.product_name && self.unit_price_cents == line.unit_price_cents
    }

    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

/// A line about to be added to a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewCartLine {
    pub product_name: String,
    pub image_url: Option<String>,
    pub unit_price_cents: i64,
    pub quantity: i64,
}

impl NewCartLine {
    /// One unit of a catalog product at its current price.
    pub fn from_component(component: &Component, quantity: i64) -> Self {
        NewCartLine {
            product_name: component.name.clone(),
            image_url: component.image_url.clone(),
            unit_price_cents: component.price_cents,
            quantity,
        }
    }

    fn into_line(self) -> CartLine {
        CartLine {
            id: Uuid::new_v4().to_string(),
            product_name: self.product_name,
            image_url: self.image_url,
            unit_price_cents: self.unit_price_cents,
            quantity: self.quantity,
            added_at: Utc::now(),
        }
    }
}

// =============================================================================
// Shipping
// =============================================================================

/// Flat-fee shipping with a free-shipping threshold.
///
/// ## Example
/// ```rust
/// use pcforge_core::{Money, ShippingPolicy};
///
/// let policy = ShippingPolicy::default();
/// assert_eq!(policy.shipping_for(Money::from_cents(10000)).cents(), 999);
/// assert_eq!(policy.shipping_for(Money::from_cents(10001)).cents(), 0);
/// assert_eq!(policy.shipping_for(Money::zero()).cents(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingPolicy {
    /// Shipping is free when the subtotal is strictly above this.
    pub free_threshold: Money,
    pub fee: Money,
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        ShippingPolicy {
            free_threshold: Money::from_cents(FREE_SHIPPING_THRESHOLD_CENTS),
            fee: Money::from_cents(SHIPPING_FEE_CENTS),
        }
    }
}

impl ShippingPolicy {
    /// An empty cart ships nothing and pays nothing.
    pub fn shipping_for(&self, subtotal: Money) -> Money {
        if subtotal.is_zero() || subtotal > self.free_threshold {
            Money::zero()
        } else {
            self.fee
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The lines of one user's cart.
///
/// ## Invariants
/// - No two lines share both product name and unit price
/// - Every quantity is in `1..=MAX_LINE_QUANTITY`
/// - At most `MAX_CART_LINES` lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Wraps lines loaded from storage.
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        Cart { lines }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, line_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == line_id)
    }

    /// Adds a line, or increases the quantity of the line with the same
    /// product name and unit price.
    ///
    /// Two builds around the same processor share a name but usually not a
    /// total, so each keeps its own line and price.
    pub fn add_line(&mut self, new_line: NewCartLine) -> CoreResult<&CartLine> {
        validate_new_cart_line(&new_line)?;

        if let Some(index) = self.lines.iter().position(|l| l.merges_with(&new_line)) {
            let line = &mut self.lines[index];
            let requested = line.quantity + new_line.quantity;
            if requested > MAX_LINE_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested,
                    max: MAX_LINE_QUANTITY,
                });
            }
            line.quantity = requested;
            return Ok(&self.lines[index]);
        }

        if self.lines.len() >= MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }

        self.lines.push(new_line.into_line());
        let last = self.lines.len() - 1;
        Ok(&self.lines[last])
    }

    /// Sets a line's quantity. Zero or less removes the line.
    pub fn set_quantity(&mut self, line_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            return self.remove_line(line_id).map(|_| ());
        }
        if quantity > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_LINE_QUANTITY,
            });
        }

        let line = self
            .lines
            .iter_mut()
            .find(|l| l.id == line_id)
            .ok_or_else(|| CoreError::CartLineNotFound(line_id.to_string()))?;
        line.quantity = quantity;
        Ok(())
    }

    pub fn remove_line(&mut self, line_id: &str) -> CoreResult<CartLine> {
        let index = self
            .lines
            .iter()
            .position(|l| l.id == line_id)
            .ok_or_else(|| CoreError::CartLineNotFound(line_id.to_string()))?;
        Ok(self.lines.remove(index))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of quantities; this is the count shown on the cart badge.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn totals(&self, policy: &ShippingPolicy) -> CartTotals {
        let subtotal = self.subtotal();
        let shipping = policy.shipping_for(subtotal);
        CartTotals {
            line_count: self.line_count(),
            item_count: self.item_count(),
            subtotal_cents: subtotal.cents(),
            shipping_cents: shipping.cents(),
            total_cents: (subtotal + shipping).cents(),
        }
    }
}

/// Cart summary for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub item_count: i64,
    pub subtotal_cents: i64,
    pub shipping_cents: i64,
    pub total_cents: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================
