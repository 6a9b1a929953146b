//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`   - Liveness check
//! - `/users/*`       - User CRUD (see [`crate::api::routes::user_routes`])
//!
//! # Middleware (outermost first)
//!
//! - **Path normalization** - Trailing slash handling, so `/users/` is `/users`
//! - **Request ID** - `X-Request-ID` assigned or kept
//! - **Tracing** - Structured request/response logging
//! - **Request ID propagation** - `X-Request-ID` echoed on the response
//! - **CORS** - Any origin
//! - **Panic recovery** - JSON 500 instead of a dropped connection

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{cors, panic, request_id, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Routes and middleware without path normalization.
///
/// Used directly by tests; [`app_router`] wraps it for serving.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(api::routes::user_routes())
        .with_state(state)
        .layer(panic::layer())
        .layer(cors::layer())
        .layer(request_id::propagate_layer())
        .layer(tracing::layer())
        .layer(request_id::set_layer())
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(api_router(state))
}
