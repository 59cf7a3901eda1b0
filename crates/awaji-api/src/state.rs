//! Shared application state.

use std::sync::Arc;

use crate::session::GameSession;

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The hosted game.
    pub session: Arc<GameSession>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(session: Arc<GameSession>) -> Self {
        Self { session }
    }
}
