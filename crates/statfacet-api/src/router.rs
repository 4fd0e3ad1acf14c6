use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health_check))

        // Filter options
        .route("/api/v1/locations/hierarchy", post(handlers::build_hierarchy))
        .route("/api/v1/time-periods/range", post(handlers::expand_range))

        .with_state(state)
}
