//! # Session State
//!
//! Holds the configurator's [`BuildSession`] between commands.
//!
//! ## Session Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session State Operations                             │
//! │                                                                         │
//! │  User Action              Command                  Session Change       │
//! │  ───────────              ───────                  ──────────────       │
//! │                                                                         │
//! │  Open page ─────────────► load_catalog() ────────► replace_catalog()   │
//! │                                                                         │
//! │  Pick part ─────────────► select_component() ────► select() + cascade  │
//! │                                                                         │
//! │  Clear slot ────────────► deselect_component() ──► deselect()          │
//! │                                                                         │
//! │  Start over ────────────► reset_build() ─────────► clear()             │
//! │                                                                         │
//! │  Render ────────────────► get_build() ───────────► (read only)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use pcforge_core::{BuildSession, Catalog};

use crate::error::ApiError;

/// Thread-safe wrapper around one build session.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    session: Arc<Mutex<BuildSession>>,
}

impl SessionState {
    /// Empty catalog, no picks.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        SessionState {
            session: Arc::new(Mutex::new(BuildSession::new(catalog))),
        }
    }

    /// Executes a function with read access to the session.
    ///
    /// ## Usage
    /// ```rust
    /// use pcforge_configurator::state::SessionState;
    ///
    /// let state = SessionState::new();
    /// let complete = state.with_session(|s| s.is_complete()).unwrap();
    /// assert!(!complete);
    /// ```
    pub fn with_session<F, R>(&self, f: F) -> Result<R, ApiError>
    where
        F: FnOnce(&BuildSession) -> R,
    {
        let session = self
            .session
            .lock()
            .map_err(|_| ApiError::internal("Build session lock poisoned"))?;
        Ok(f(&session))
    }

    /// Executes a function with write access to the session.
    pub fn with_session_mut<F, R>(&self, f: F) -> Result<R, ApiError>
    where
        F: FnOnce(&mut BuildSession) -> R,
    {
        let mut session = self
            .session
            .lock()
            .map_err(|_| ApiError::internal("Build session lock poisoned"))?;
        Ok(f(&mut session))
    }
}
