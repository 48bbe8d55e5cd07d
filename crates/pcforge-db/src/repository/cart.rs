//! # Cart Repository
//!
//! Per-user cart lines.
//!
//! ## Write Path
//! ```text
//! add(user, line)
//!      │
//!      ▼
//! BEGIN
//!   load user's lines ──► pcforge_core::Cart::add_line()   (merge + limits)
//!      │                         │
//!      │           merged? ──────┴────── new?
//!      ▼                                   ▼
//!   UPDATE quantity                 INSERT line
//! COMMIT
//! ```
//!
//! `UNIQUE (user_id, product_name, unit_price_cents)` backs the merge rule at
//! the schema level.

use std::future::Future;

use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;

use crate::error::{DbError, DbResult};
use pcforge_core::{Cart, CartLine, CartStore, NewCartLine};

#[derive(Debug, sqlx::FromRow)]
struct CartLineRow {
    id: String,
    product_name: String,
    image_url: Option<String>,
    unit_price_cents: i64,
    quantity: i64,
    added_at: DateTime<Utc>,
}

impl From<CartLineRow> for CartLine {
    fn from(row: CartLineRow) -> Self {
        CartLine {
            id: row.id,
            product_name: row.product_name,
            image_url: row.image_url,
            unit_price_cents: row.unit_price_cents,
            quantity: row.quantity,
            added_at: row.added_at,
        }
    }
}

/// Repository for cart lines.
#[derive(Debug, Clone)]
pub struct CartRepository {
    pool: SqlitePool,
}

impl CartRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CartRepository { pool }
    }

    /// Loads a user's cart, oldest line first.
    pub async fn load(&self, user_id: &str) -> DbResult<Cart> {
        debug!(user_id, "Loading cart");

        let rows = sqlx::query_as::<_, CartLineRow>(
            r#"
            SELECT id, product_name, image_url, unit_price_cents, quantity, added_at
            FROM cart_lines
            WHERE user_id = ?1
            ORDER BY added_at, id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Cart::from_lines(rows.into_iter().map(CartLine::from).collect()))
    }

    async fn load_in(tx: &mut Transaction<'_, Sqlite>, user_id: &str) -> DbResult<Cart> {
        let rows = sqlx::query_as::<_, CartLineRow>(
            r#"
            SELECT id, product_name, image_url, unit_price_cents, quantity, added_at
            FROM cart_lines
            WHERE user_id = ?1
            ORDER BY added_at, id
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut **tx)
        .await?;

        Ok(Cart::from_lines(rows.into_iter().map(CartLine::from).collect()))
    }

    /// Adds a line or increases the quantity of the line with the same name
    /// and unit price.
    ///
    /// ## Returns
    /// * `Ok(CartLine)` - The stored line after the merge
    /// * `Err(DbError::Rejected)` - Invalid line or a cart limit hit
    pub async fn add(&self, user_id: &str, new_line: NewCartLine) -> DbResult<CartLine> {
        debug!(user_id, product = %new_line.product_name, "Adding cart line");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let mut cart = Self::load_in(&mut tx, user_id).await?;
        let existed = cart.lines().iter().any(|l| l.merges_with(&new_line));
        let line = cart.add_line(new_line)?.clone();

        if existed {
            sqlx::query("UPDATE cart_lines SET quantity = ?2 WHERE id = ?1")
                .bind(&line.id)
                .bind(line.quantity)
                .execute(&mut *tx)
                .await?;
        } else {
            sqlx::query(
                r#"
                INSERT INTO cart_lines (
                    id, user_id, product_name, image_url,
                    unit_price_cents, quantity, added_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )
            .bind(&line.id)
            .bind(user_id)
            .bind(&line.product_name)
            .bind(&line.image_url)
            .bind(line.unit_price_cents)
            .bind(line.quantity)
            .bind(line.added_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(line)
    }

    /// Sets a line's quantity; zero or less deletes the line.
    pub async fn set_quantity(&self, user_id: &str, line_id: &str, quantity: i64) -> DbResult<()> {
        debug!(user_id, line_id, quantity, "Updating cart line quantity");

        if quantity <= 0 {
            return self.remove(user_id, line_id).await;
        }
        pcforge_core::validation::validate_quantity(quantity)
            .map_err(pcforge_core::CoreError::from)?;

        let result = sqlx::query("UPDATE cart_lines SET quantity = ?3 WHERE id = ?1 AND user_id = ?2")
            .bind(line_id)
            .bind(user_id)
            .bind(quantity)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("CartLine", line_id));
        }

        Ok(())
    }

    pub async fn remove(&self, user_id: &str, line_id: &str) -> DbResult<()> {
        debug!(user_id, line_id, "Removing cart line");

        let result = sqlx::query("DELETE FROM cart_lines WHERE id = ?1 AND user_id = ?2")
            .bind(line_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("CartLine", line_id));
        }

        Ok(())
    }

    /// Deletes every line of a user. Returns how many were removed.
    pub async fn clear(&self, user_id: &str) -> DbResult<u64> {
        debug!(user_id, "Clearing cart");

        let result = sqlx::query("DELETE FROM cart_lines WHERE user_id = ?1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

impl CartStore for CartRepository {
    type Error = DbError;

    fn add_cart_line(
        &self,
        user_id: &str,
        line: NewCartLine,
    ) -> impl Future<Output = DbResult<CartLine>> + Send {
        self.add(user_id, line)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use pcforge_core::{CoreError, ShippingPolicy, MAX_LINE_QUANTITY};

    async fn repo() -> CartRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().cart()
    }

    fn line(name: &str, cents: i64, quantity: i64) -> NewCartLine {
        NewCartLine {
            product_name: name.to_string(),
            image_url: None,
            unit_price_cents: cents,
            quantity,
        }
    }

    #[tokio::test]
    async fn test_add_merges_by_product_name() {
        let repo = repo().await;
        let first = repo.add("u1", line("RTX 4070", 59900, 1)).await.unwrap();
        let merged = repo.add("u1", line("RTX 4070", 59900, 2)).await.unwrap();

        assert_eq!(first.id, merged.id);
        assert_eq!(merged.quantity, 3);

        let cart = repo.load("u1").await.unwrap();
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.item_count(), 3);
    }

    #[tokio::test]
    async fn test_repriced_build_is_stored_as_a_new_line() {
        let repo = repo().await;
        let name = "PC Gamer Custom (Ryzen 5 7600)";
        repo.add("u1", line(name, 152800, 1)).await.unwrap();
        let other = repo.add("u1", line(name, 189900, 1)).await.unwrap();
        repo.add("u1", line(name, 152800, 1)).await.unwrap();

        assert_eq!(other.quantity, 1);
        let cart = repo.load("u1").await.unwrap();
        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.subtotal().cents(), 2 * 152800 + 189900);
    }

    #[tokio::test]
    async fn test_carts_are_per_user() {
        let repo = repo().await;
        repo.add("u1", line("Fan", 1499, 1)).await.unwrap();
        repo.add("u2", line("Fan", 1499, 4)).await.unwrap();

        assert_eq!(repo.load("u1").await.unwrap().item_count(), 1);
        assert_eq!(repo.load("u2").await.unwrap().item_count(), 4);

        assert_eq!(repo.clear("u1").await.unwrap(), 1);
        assert!(repo.load("u1").await.unwrap().is_empty());
        assert!(!repo.load("u2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_quantity_and_remove() {
        let repo = repo().await;
        let added = repo.add("u1", line("Fan", 1499, 1)).await.unwrap();

        repo.set_quantity("u1", &added.id, 5).await.unwrap();
        assert_eq!(repo.load("u1").await.unwrap().item_count(), 5);

        assert!(matches!(
            repo.set_quantity("u2", &added.id, 2).await,
            Err(DbError::NotFound { .. })
        ));

        repo.set_quantity("u1", &added.id, 0).await.unwrap();
        assert!(repo.load("u1").await.unwrap().is_empty());
        assert!(repo.remove("u1", &added.id).await.is_err());
    }

    #[tokio::test]
    async fn test_limits_are_enforced() {
        let repo = repo().await;
        repo.add("u1", line("Cable", 500, MAX_LINE_QUANTITY)).await.unwrap();

        assert!(matches!(
            repo.add("u1", line("Cable", 500, 1)).await,
            Err(DbError::Rejected(CoreError::QuantityTooLarge { .. }))
        ));
        assert!(matches!(
            repo.add("u1", line("Free", 0, 0)).await,
            Err(DbError::Rejected(CoreError::Validation(_)))
        ));
    }

    #[tokio::test]
    async fn test_cart_store_totals_with_shipping() {
        let repo = repo().await;
        repo.add_cart_line("u1", line("PC Gamer Custom (Config)", 150000, 1))
            .await
            .unwrap();

        let totals = repo.load("u1").await.unwrap().totals(&ShippingPolicy::default());
        assert_eq!(totals.shipping_cents, 0);
        assert_eq!(totals.total_cents, 150000);
    }
}
