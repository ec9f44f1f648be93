use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::blog;
use super::health;
use super::state::AppState;

/// Create a minimal router without state
pub fn create_router() -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .layer(TraceLayer::new_for_http())
}

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .nest("/blog", blog::create_blog_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
