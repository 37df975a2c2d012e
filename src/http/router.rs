//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression,
//! tracing), and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Tour CRUD
        .route("/tours", get(handlers::list_tours))
        .route("/tours", post(handlers::create_tour))
        // Curated alias and reports
        .route("/tours/top-5-cheap", get(handlers::top_tours))
        .route("/tours/stats", get(handlers::tour_stats))
        .route("/tours/monthly-plan/{year}", get(handlers::monthly_plan))
        .route("/tours/{id}", get(handlers::get_tour))
        .route("/tours/{id}", patch(handlers::update_tour))
        .route("/tours/{id}", delete(handlers::delete_tour));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
