//! # Component Repository
//!
//! Database operations for catalog entries.
//!
//! ## Attribute Bag Storage
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Component.compatibility              components.compatibility (TEXT)   │
//! │  ───────────────────────              ─────────────────────────────     │
//! │  None                        ◄──────► NULL                              │
//! │  Some(Cpu { AM5, 120 })      ◄──────► {"kind":"cpu","socket":"AM5",     │
//! │                                        "tdp_watts":120}                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A bag that no longer parses is logged and read as `None` by the list
//! queries, so the rest of the catalog still loads. `get_by_id` reports it as
//! `DbError::Corrupt`.

use std::future::Future;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use pcforge_core::{Catalog, CatalogProvider, Category, Compatibility, Component};

const COMPONENT_COLUMNS: &str = r#"
    id, name, category, price_cents, original_price_cents,
    image_url, badge, description, in_stock, rating, review_count,
    allow_in_configurator, compatibility, created_at, updated_at
"#;

/// Raw `components` row.
#[derive(Debug, sqlx::FromRow)]
struct ComponentRow {
    id: String,
    name: String,
    category: Category,
    price_cents: i64,
    original_price_cents: Option<i64>,
    image_url: Option<String>,
    badge: Option<String>,
    description: Option<String>,
    in_stock: bool,
    rating: f64,
    review_count: i64,
    allow_in_configurator: bool,
    compatibility: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ComponentRow {
    fn decode_bag(&self) -> Result<Option<Compatibility>, serde_json::Error> {
        self.compatibility
            .as_deref()
            .map(serde_json::from_str::<Compatibility>)
            .transpose()
    }

    fn into_component(self, compatibility: Option<Compatibility>) -> Component {
        Component {
            id: self.id,
            name: self.name,
            category: self.category,
            price_cents: self.price_cents,
            original_price_cents: self.original_price_cents,
            image_url: self.image_url,
            badge: self.badge,
            description: self.description,
            in_stock: self.in_stock,
            rating: self.rating,
            review_count: self.review_count,
            allow_in_configurator: self.allow_in_configurator,
            compatibility,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl TryFrom<ComponentRow> for Component {
    type Error = DbError;

    fn try_from(row: ComponentRow) -> DbResult<Self> {
        let compatibility = row
            .decode_bag()
            .map_err(|e| DbError::corrupt("Component", &row.id, e))?;
        Ok(row.into_component(compatibility))
    }
}

fn encode_bag(component: &Component) -> DbResult<Option<String>> {
    component
        .compatibility
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(DbError::from)
}

fn into_components(rows: Vec<ComponentRow>) -> Vec<Component> {
    rows.into_iter()
        .map(|row| {
            let compatibility = row.decode_bag().unwrap_or_else(|e| {
                warn!(id = %row.id, error = %e, "Ignoring unreadable compatibility data");
                None
            });
            row.into_component(compatibility)
        })
        .collect()
}

/// Repository for catalog entries.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.components();
///
/// let catalog = repo.fetch_catalog().await?;
/// let gpu = repo.get_by_id("uuid-here").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ComponentRepository {
    pool: SqlitePool,
}

impl ComponentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ComponentRepository { pool }
    }

    /// Lists every product, ordered by category then name.
    pub async fn list(&self) -> DbResult<Vec<Component>> {
        debug!("Listing components");

        let sql = format!(
            "SELECT {COMPONENT_COLUMNS} FROM components ORDER BY category, name, id"
        );
        let rows = sqlx::query_as::<_, ComponentRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(into_components(rows))
    }

    /// Lists products of one category.
    pub async fn list_by_category(&self, category: Category) -> DbResult<Vec<Component>> {
        debug!(%category, "Listing components by category");

        let sql = format!(
            "SELECT {COMPONENT_COLUMNS} FROM components WHERE category = ?1 ORDER BY name, id"
        );
        let rows = sqlx::query_as::<_, ComponentRow>(&sql)
            .bind(category)
            .fetch_all(&self.pool)
            .await?;

        Ok(into_components(rows))
    }

    /// Lists products the configurator may offer.
    pub async fn list_configurable(&self) -> DbResult<Vec<Component>> {
        let sql = format!(
            "SELECT {COMPONENT_COLUMNS} FROM components \
             WHERE allow_in_configurator = 1 ORDER BY category, name, id"
        );
        let rows = sqlx::query_as::<_, ComponentRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(into_components(rows))
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Component))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Component>> {
        let sql = format!("SELECT {COMPONENT_COLUMNS} FROM components WHERE id = ?1");
        let row = sqlx::query_as::<_, ComponentRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Component::try_from).transpose()
    }

    /// Inserts a new product (ID generated beforehand).
    pub async fn insert(&self, component: &Component) -> DbResult<Component> {
        debug!(id = %component.id, name = %component.name, "Inserting component");

        let bag = encode_bag(component)?;

        sqlx::query(
            r#"
            INSERT INTO components (
                id, name, category, price_cents, original_price_cents,
                image_url, badge, description, in_stock, rating, review_count,
                allow_in_configurator, compatibility, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5,
                ?6, ?7, ?8, ?9, ?10, ?11,
                ?12, ?13, ?14, ?15
            )
            "#,
        )
        .bind(&component.id)
        .bind(&component.name)
        .bind(component.category)
        .bind(component.price_cents)
        .bind(component.original_price_cents)
        .bind(&component.image_url)
        .bind(&component.badge)
        .bind(&component.description)
        .bind(component.in_stock)
        .bind(component.rating)
        .bind(component.review_count)
        .bind(component.allow_in_configurator)
        .bind(bag)
        .bind(component.created_at)
        .bind(component.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(component.clone())
    }

    /// Updates an existing product. Review count and creation time are not
    /// touched.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(&self, component: &Component) -> DbResult<()> {
        debug!(id = %component.id, "Updating component");

        let bag = encode_bag(component)?;
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE components SET
                name = ?2,
                category = ?3,
                price_cents = ?4,
                original_price_cents = ?5,
                image_url = ?6,
                badge = ?7,
                description = ?8,
                in_stock = ?9,
                rating = ?10,
                allow_in_configurator = ?11,
                compatibility = ?12,
                updated_at = ?13
            WHERE id = ?1
            "#,
        )
        .bind(&component.id)
        .bind(&component.name)
        .bind(component.category)
        .bind(component.price_cents)
        .bind(component.original_price_cents)
        .bind(&component.image_url)
        .bind(&component.badge)
        .bind(&component.description)
        .bind(component.in_stock)
        .bind(component.rating)
        .bind(component.allow_in_configurator)
        .bind(bag)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Component", &component.id));
        }

        Ok(())
    }

    /// Deletes a product. Cart lines keep their frozen name and price.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting component");

        let result = sqlx::query("DELETE FROM components WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Component", id));
        }

        Ok(())
    }

    /// Counts products (for diagnostics and the seed guard).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM components")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

impl CatalogProvider for ComponentRepository {
    type Error = DbError;

    fn fetch_catalog(&self) -> impl Future<Output = DbResult<Catalog>> + Send {
        async move {
            let components = self.list().await?;
            debug!(count = components.len(), "Catalog snapshot loaded");
            Ok(Catalog::new(components))
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use pcforge_core::{
        CaseSpec, ComponentDraft, FormFactor, Money, ProcessorSpec, Socket, DEFAULT_RATING,
    };

    async fn repo() -> ComponentRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().components()
    }

    fn cpu() -> Component {
        ComponentDraft::new("Ryzen 7 7800X3D", Category::Cpu, Money::from_cents(44900))
            .with_compatibility(Compatibility::Cpu(ProcessorSpec {
                socket: Socket::Am5,
                tdp_watts: Some(120),
            }))
            .into_component("c1")
    }

    #[tokio::test]
    async fn test_insert_and_get_round_trips_bag() {
        let repo = repo().await;
        let cpu = cpu();
        repo.insert(&cpu).await.unwrap();

        let stored = repo.get_by_id("c1").await.unwrap().unwrap();
        assert_eq!(stored.compatibility, cpu.compatibility);
        assert_eq!(stored.rating, DEFAULT_RATING);
        assert!(stored.allow_in_configurator);
        assert!(repo.get_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let repo = repo().await;
        let mut cpu = cpu();
        repo.insert(&cpu).await.unwrap();

        cpu.price_cents = 39900;
        cpu.allow_in_configurator = false;
        repo.update(&cpu).await.unwrap();

        let stored = repo.get_by_id("c1").await.unwrap().unwrap();
        assert_eq!(stored.price_cents, 39900);
        assert!(repo.list_configurable().await.unwrap().is_empty());

        repo.delete("c1").await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(matches!(
            repo.delete("c1").await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            repo.update(&cpu).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_catalog_includes_every_category() {
        let repo = repo().await;
        repo.insert(&cpu()).await.unwrap();
        let case = ComponentDraft::new("Lancool 216", Category::Case, Money::from_cents(9900))
            .with_compatibility(Compatibility::Case(CaseSpec {
                max_gpu_length_mm: 392,
                supported_form_factors: vec![FormFactor::Atx],
            }))
            .into_component("k1");
        repo.insert(&case).await.unwrap();
        let mouse = ComponentDraft::new("G502", Category::Peripheral, Money::from_cents(4999))
            .into_component("p1");
        repo.insert(&mouse).await.unwrap();

        let catalog = repo.fetch_catalog().await.unwrap();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.get("p1").unwrap().compatibility.is_none());
        assert_eq!(repo.list_by_category(Category::Case).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_bag_is_reported() {
        let repo = repo().await;
        repo.insert(&cpu()).await.unwrap();
        sqlx::query("UPDATE components SET compatibility = '{\"kind\":\"toaster\"}'")
            .execute(&repo.pool)
            .await
            .unwrap();

        assert!(matches!(
            repo.get_by_id("c1").await,
            Err(DbError::Corrupt { .. })
        ));
    }

    #[tokio::test]
    async fn test_unreadable_bag_does_not_block_the_catalog() {
        let repo = repo().await;
        repo.insert(&cpu()).await.unwrap();
        let case = ComponentDraft::new("Lancool 216", Category::Case, Money::from_cents(9900))
            .into_component("k1");
        repo.insert(&case).await.unwrap();

        sqlx::query("UPDATE components SET compatibility = ?1 WHERE id = 'k1'")
            .bind(r#"{"kind":"case","max_gpu_length_mm":350,"supported_form_factors":"ATX"}"#)
            .execute(&repo.pool)
            .await
            .unwrap();
        sqlx::query("UPDATE components SET compatibility = '{\"kind\":\"toaster\"}' WHERE id = 'c1'")
            .execute(&repo.pool)
            .await
            .unwrap();

        let catalog = repo.fetch_catalog().await.unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get("c1").unwrap().compatibility.is_none());
        assert_eq!(
            catalog.get("k1").unwrap().compatibility,
            Some(Compatibility::Case(CaseSpec {
                max_gpu_length_mm: 350,
                supported_form_factors: vec![FormFactor::Atx],
            }))
        );
        assert_eq!(repo.list_configurable().await.unwrap().len(), 2);
    }
}
