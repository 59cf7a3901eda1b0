//! Route modules.

use axum::Router;

use crate::state::AppState;

pub mod game;
pub mod health;

/// Assembles the full application router.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .nest("/api/v1/game", game::router())
        .with_state(state)
}
