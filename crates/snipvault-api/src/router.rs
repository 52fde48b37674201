//! Route definitions for the SnipVault HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let server = &state.config.server;
    let body_limit = server.max_body_bytes;
    let timeout = Duration::from_secs(server.request_timeout_seconds);
    let cors = build_cors_layer(&server.cors);

    let api_routes = Router::new()
        .merge(snippet_routes())
        .merge(version_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TimeoutLayer::new(timeout))
        .layer(build_compression_layer())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Snippet create, read and update
fn snippet_routes() -> Router<AppState> {
    Router::new()
        .route("/snippets", post(handlers::snippet::create_snippet))
        .route(
            "/snippets/{snippet_id}",
            get(handlers::snippet::get_snippet)
                .put(handlers::snippet::update_snippet)
                .patch(handlers::snippet::update_snippet),
        )
}

/// Version history, comparison and restore
fn version_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/snippets/{snippet_id}/versions",
            get(handlers::version::list_versions),
        )
        .route(
            "/snippets/{snippet_id}/versions/latest",
            get(handlers::version::get_latest_version),
        )
        .route(
            "/snippets/{snippet_id}/versions/compare",
            get(handlers::version::compare_versions),
        )
        .route(
            "/snippets/{snippet_id}/versions/stats",
            get(handlers::version::version_stats),
        )
        .route(
            "/snippets/{snippet_id}/versions/number/{version_number}",
            get(handlers::version::get_version_by_number),
        )
        .route(
            "/snippets/{snippet_id}/versions/{version_id}",
            get(handlers::version::get_version),
        )
        .route(
            "/snippets/{snippet_id}/versions/{version_id}/diff",
            get(handlers::version::version_diff),
        )
        .route(
            "/snippets/{snippet_id}/versions/{version_id}/restore",
            post(handlers::version::restore_version),
        )
}

/// Liveness and store connectivity
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
