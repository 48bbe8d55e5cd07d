//! # Commands Module
//!
//! Operations exposed to the storefront front-end and the CLI.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs           ◄─── You are here (exports)
//! ├── configurator.rs  ◄─── Build session: select, deselect, add build to cart
//! ├── cart.rs          ◄─── Cart manipulation
//! └── catalog.rs       ◄─── Catalogue browsing, product editor
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only the build session
//! fn select_component(session: &SessionState, category: &str, component_id: &str)
//!
//! // Session plus any cart store
//! async fn add_build_to_cart<S: CartStore>(store: &S, session: &SessionState, user_id: &str)
//!
//! // Database and shipping rules
//! async fn get_cart(db: &DbState, config: &AppConfig, user_id: &str)
//! ```

pub mod cart;
pub mod catalog;
pub mod configurator;

use pcforge_core::ValidationError;

use crate::error::ApiError;

/// Cart operations need a signed-in user.
pub(crate) fn require_user(user_id: &str) -> Result<(), ApiError> {
    if user_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "user_id".to_string(),
        }
        .into());
    }
    Ok(())
}
