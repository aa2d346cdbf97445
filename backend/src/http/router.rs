//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // Read-only API, so any origin may call it
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        .route("/occupancy", get(handlers::get_occupancy))
        .route("/occupancy/heatmap", get(handlers::get_heatmap))
        .route("/occupancy/timeline", get(handlers::get_timeline))
        .route("/dashboard", get(handlers::get_dashboard));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
