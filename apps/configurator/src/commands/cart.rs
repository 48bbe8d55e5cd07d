//! # Cart Commands
//!
//! Per-user cart backed by the `cart_lines` table.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CART                                                  3 items         │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  PC Gamer Custom (AMD Ryzen 7 7800X3D)   x1          1528.00 €         │
//! │  Logitech G502 X                         x2           179.98 €         │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  Subtotal                                            1707.98 €         │
//! │  Shipping                                               0.00 €         │
//! │  TOTAL                                               1707.98 €         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use pcforge_core::{Cart, CartLine, CartTotals, NewCartLine};
use serde::Serialize;
use tracing::{debug, info};

use crate::commands::require_user;
use crate::error::{ApiError, ErrorCode};
use crate::state::{AppConfig, DbState};

/// Cart response including lines and totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
}

impl CartResponse {
    fn new(cart: Cart, config: &AppConfig) -> Self {
        let totals = cart.totals(&config.shipping_policy());
        CartResponse {
            lines: cart.lines().to_vec(),
            totals,
        }
    }
}

async fn reload(db: &DbState, config: &AppConfig, user_id: &str) -> Result<CartResponse, ApiError> {
    let cart = db.inner().cart().load(user_id).await?;
    Ok(CartResponse::new(cart, config))
}

pub async fn get_cart(
    db: &DbState,
    config: &AppConfig,
    user_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(user_id, "get_cart command");
    require_user(user_id)?;
    reload(db, config, user_id).await
}

/// Adds a catalog product to the cart.
///
/// ## Behavior
/// - Same product at the same price already in cart: quantity increases
/// - Otherwise: new line with the price frozen at the current price
/// - Out-of-stock products are refused
///
/// ## Arguments
/// * `product_id` - Product UUID to add
/// * `quantity` - Quantity to add (default: 1)
pub async fn add_to_cart(
    db: &DbState,
    config: &AppConfig,
    user_id: &str,
    product_id: &str,
    quantity: Option<i64>,
) -> Result<CartResponse, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(user_id, product_id, quantity, "add_to_cart command");
    require_user(user_id)?;

    let product = db
        .inner()
        .components()
        .get_by_id(product_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", product_id))?;

    if !product.in_stock {
        return Err(ApiError::new(
            ErrorCode::OutOfStock,
            format!("{} is out of stock", product.name),
        ));
    }

    let line = db
        .inner()
        .cart()
        .add(user_id, NewCartLine::from_component(&product, quantity))
        .await?;
    info!(user_id, product = %line.product_name, quantity = line.quantity, "Added to cart");

    reload(db, config, user_id).await
}

/// Sets the quantity of a line. Zero or less removes it.
pub async fn update_cart_item(
    db: &DbState,
    config: &AppConfig,
    user_id: &str,
    line_id: &str,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(user_id, line_id, quantity, "update_cart_item command");
    require_user(user_id)?;

    db.inner().cart().set_quantity(user_id, line_id, quantity).await?;
    reload(db, config, user_id).await
}

pub async fn remove_from_cart(
    db: &DbState,
    config: &AppConfig,
    user_id: &str,
    line_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(user_id, line_id, "remove_from_cart command");
    require_user(user_id)?;

    db.inner().cart().remove(user_id, line_id).await?;
    reload(db, config, user_id).await
}

/// Clears all lines from the cart.
pub async fn clear_cart(
    db: &DbState,
    config: &AppConfig,
    user_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(user_id, "clear_cart command");
    require_user(user_id)?;

    let removed = db.inner().cart().clear(user_id).await?;
    info!(user_id, removed, "Cart cleared");
    reload(db, config, user_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcforge_core::{Category, Component, Money};

    async fn setup() -> (DbState, AppConfig) {
        let db = DbState::in_memory().await.unwrap();
        let repo = db.inner().components();

        repo.insert(&Component::new(
            "mouse",
            "Logitech G502 X",
            Category::Peripheral,
            Money::from_cents(8999),
        ))
        .await
        .unwrap();

        let mut sold_out = Component::new(
            "gpu",
            "RTX 4090",
            Category::Gpu,
            Money::from_cents(189900),
        );
        sold_out.in_stock = false;
        repo.insert(&sold_out).await.unwrap();

        (db, AppConfig::default())
    }

    #[tokio::test]
    async fn test_add_merges_and_charges_shipping() {
        let (db, config) = setup().await;

        add_to_cart(&db, &config, "u1", "mouse", None).await.unwrap();
        let cart = add_to_cart(&db, &config, "u1", "mouse", Some(1)).await.unwrap();

        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].quantity, 2);
        assert_eq!(cart.totals.item_count, 2);
        assert_eq!(cart.totals.subtotal_cents, 17998);
        assert_eq!(cart.totals.shipping_cents, 0);

        let line_id = cart.lines[0].id.clone();
        let cart = update_cart_item(&db, &config, "u1", &line_id, 1).await.unwrap();
        assert_eq!(cart.totals.shipping_cents, 999);
        assert_eq!(cart.totals.total_cents, 8999 + 999);
    }

    #[tokio::test]
    async fn test_rejects_unknown_and_sold_out_products() {
        let (db, config) = setup().await;

        let err = add_to_cart(&db, &config, "u1", "nope", None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = add_to_cart(&db, &config, "u1", "gpu", None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OutOfStock);

        let err = add_to_cart(&db, &config, "", "mouse", None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_zero_quantity_removes_and_clear_empties() {
        let (db, config) = setup().await;
        let cart = add_to_cart(&db, &config, "u1", "mouse", Some(3)).await.unwrap();
        let line_id = cart.lines[0].id.clone();

        let cart = update_cart_item(&db, &config, "u1", &line_id, 0).await.unwrap();
        assert!(cart.lines.is_empty());
        assert_eq!(cart.totals.total_cents, 0);

        let err = remove_from_cart(&db, &config, "u1", &line_id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        add_to_cart(&db, &config, "u1", "mouse", None).await.unwrap();
        let cart = clear_cart(&db, &config, "u1").await.unwrap();
        assert!(cart.lines.is_empty());
        assert_eq!(get_cart(&db, &config, "u1").await.unwrap(), cart);
    }

    #[tokio::test]
    async fn test_quantity_limit_surfaces_as_validation_error() {
        let (db, config) = setup().await;
        let err = add_to_cart(&db, &config, "u1", "mouse", Some(500)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
