//! Route table for the health API.

use axum::{routing::get, Router};

use crate::health::{health, root};
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .with_state(state)
}
