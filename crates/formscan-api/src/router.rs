use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health_check))

        // Templates
        .route(
            "/api/v1/templates",
            get(handlers::list_templates).post(handlers::create_template),
        )
        .route(
            "/api/v1/templates/{id}",
            get(handlers::get_template)
                .put(handlers::update_template)
                .delete(handlers::delete_template),
        )

        // Extraction
        .route("/api/v1/templates/{id}/extract", post(handlers::extract_fields))

        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
