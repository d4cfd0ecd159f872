//! Axum router setup for the Simplyfi server

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::{
    assets::static_handler,
    handlers::{explain, flowchart, health_check, highlight, languages, syntax_tree},
    ServerState,
};

/// Create the axum router with all routes
pub fn create_router(state: Arc<ServerState>) -> Router {
    Router::new()
        // REST API endpoints
        .route("/api/health", get(health_check))
        .route("/api/languages", get(languages))
        .route("/api/flowchart", post(flowchart))
        .route("/api/syntax-tree", post(syntax_tree))
        .route("/api/explain", post(explain))
        .route("/api/highlight", post(highlight))
        // Static file serving
        .route("/", get(static_handler))
        .route("/*path", get(static_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
