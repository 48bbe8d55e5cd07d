//! # Catalog Commands
//!
//! Catalogue browsing and the admin product editor.
//!
//! Admin gating happens before these commands are reached; they only check
//! that the product form itself is valid.

use pcforge_core::validation::{validate_catalog_query, validate_draft};
use pcforge_core::{Catalog, CatalogQuery, Component, ComponentDraft};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::DbState;

/// Lists products matching the filter, in catalog order.
///
/// ## Filter
/// - `search`: case-insensitive substring of the name
/// - `category`: one category, or all when absent
/// - `minPriceCents` / `maxPriceCents`: inclusive bounds (default 0 to 3000 €)
pub async fn browse_catalog(db: &DbState, query: &CatalogQuery) -> Result<Vec<Component>, ApiError> {
    debug!(?query, "browse_catalog command");
    validate_catalog_query(query)?;

    let catalog = Catalog::new(db.inner().components().list().await?);
    Ok(catalog.browse(query).into_iter().cloned().collect())
}

/// Creates a product from the editor form.
///
/// New products start with a rating of 5 unless the form sets one.
pub async fn create_product(db: &DbState, draft: ComponentDraft) -> Result<Component, ApiError> {
    debug!(name = %draft.name, category = %draft.category, "create_product command");
    validate_draft(&draft)?;

    let component = draft.into_component(Uuid::new_v4().to_string());
    let created = db.inner().components().insert(&component).await?;

    info!(id = %created.id, name = %created.name, "Product created");
    Ok(created)
}

/// Replaces a product's editable fields.
pub async fn update_product(
    db: &DbState,
    id: &str,
    draft: ComponentDraft,
) -> Result<Component, ApiError> {
    debug!(id, "update_product command");
    validate_draft(&draft)?;

    let repo = db.inner().components();
    let existing = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", id))?;

    let updated = draft.apply_to(&existing);
    repo.update(&updated).await?;

    info!(id, "Product updated");
    Ok(updated)
}

pub async fn delete_product(db: &DbState, id: &str) -> Result<(), ApiError> {
    debug!(id, "delete_product command");
    db.inner().components().delete(id).await?;
    info!(id, "Product deleted");
    Ok(())
}
