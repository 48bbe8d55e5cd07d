//! # Configurator Commands
//!
//! Drive one [`BuildSession`](pcforge_core::BuildSession): load the catalog,
//! pick and clear parts, and hand the finished build to the cart.
//!
//! ## Build Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Build Lifecycle                                      │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │ Catalog  │────►│ Partial  │────►│ Complete │────►│ In Cart  │       │
//! │  │ loaded   │     │  build   │     │  build   │     │          │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │  ▲              │                              │
//! │              select_component            add_build_to_cart              │
//! │              deselect_component                                         │
//! │                        │  │                                             │
//! │                        ▼  │                                             │
//! │                  cascade notices                                        │
//! │                                                                         │
//! │  reset_build ─────────────────────────────────► (back to empty)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use pcforge_core::{BuildView, CartLine, CartStore, CatalogProvider, Category, Notice};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::commands::require_user;
use crate::error::ApiError;
use crate::state::SessionState;

/// A notice plus its display text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoticeMessage {
    #[serde(flatten)]
    pub notice: Notice,
    pub message: String,
}

impl From<Notice> for NoticeMessage {
    fn from(notice: Notice) -> Self {
        NoticeMessage {
            message: notice.to_string(),
            notice,
        }
    }
}

/// The build after a change, plus what the change cleared.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildResponse {
    pub build: BuildView,
    pub notices: Vec<NoticeMessage>,
}

impl BuildResponse {
    fn new(build: BuildView, notices: Vec<Notice>) -> Self {
        for notice in &notices {
            warn!(removed = ?notice.removed(), "{}", notice);
        }
        BuildResponse {
            build,
            notices: notices.into_iter().map(NoticeMessage::from).collect(),
        }
    }
}

/// Fetches a fresh catalog into the session.
///
/// Picks whose component disappeared or left the configurator are dropped
/// and reported.
pub async fn load_catalog<P>(provider: &P, session: &SessionState) -> Result<BuildResponse, ApiError>
where
    P: CatalogProvider,
    ApiError: From<P::Error>,
{
    debug!("load_catalog command");

    let catalog = provider.fetch_catalog().await?;
    info!(components = catalog.len(), "Catalog loaded");

    let (build, notices) = session.with_session_mut(|s| {
        let notices = s.replace_catalog(catalog);
        (s.view(), notices)
    })?;

    Ok(BuildResponse::new(build, notices))
}

pub fn get_build(session: &SessionState) -> Result<BuildView, ApiError> {
    debug!("get_build command");
    session.with_session(|s| s.view())
}

/// Selects a component for a slot and runs the cascade.
///
/// ## Arguments
/// * `category` - Slot name, e.g. `"cpu"` or `"motherboard"`
/// * `component_id` - Catalog ID of the pick
///
/// ## Errors
/// * `VALIDATION_ERROR` - unknown slot name or a catalogue-only category
/// * `NOT_FOUND` - unknown component
/// * `INCOMPATIBLE` - the component is not offered for the current build
pub fn select_component(
    session: &SessionState,
    category: &str,
    component_id: &str,
) -> Result<BuildResponse, ApiError> {
    debug!(category, component_id, "select_component command");

    let category: Category = category.parse()?;
    let (build, notices) = session.with_session_mut(|s| {
        let notices = s.select(category, component_id)?;
        Ok::<_, ApiError>((s.view(), notices))
    })??;

    Ok(BuildResponse::new(build, notices))
}

/// Clears one slot. Other picks are left alone.
pub fn deselect_component(session: &SessionState, category: &str) -> Result<BuildView, ApiError> {
    debug!(category, "deselect_component command");

    let category: Category = category.parse()?;
    session.with_session_mut(|s| {
        if let Some(previous) = s.deselect(category) {
            debug!(%category, component_id = %previous, "Slot cleared");
        }
        s.view()
    })
}

pub fn reset_build(session: &SessionState) -> Result<BuildView, ApiError> {
    debug!("reset_build command");
    session.with_session_mut(|s| {
        s.clear();
        s.view()
    })
}

/// Adds the finished build to the user's cart as one line.
///
/// The selection is kept so the user can go on tweaking the build.
///
/// ## Errors
/// * `VALIDATION_ERROR` - no signed-in user
/// * `BUILD_INCOMPLETE` - a slot is still empty
pub async fn add_build_to_cart<S>(
    store: &S,
    session: &SessionState,
    user_id: &str,
) -> Result<CartLine, ApiError>
where
    S: CartStore,
    ApiError: From<S::Error>,
{
    debug!(user_id, "add_build_to_cart command");

    require_user(user_id)?;

    let line = session.with_session(|s| s.composite_line())??;
    let stored = store.add_cart_line(user_id, line).await?;

    info!(
        user_id,
        product = %stored.product_name,
        price_cents = stored.unit_price_cents,
        "Build added to cart"
    );
    Ok(stored)
}

// =============================================================================
// Unit Tests
// =============================================================================
