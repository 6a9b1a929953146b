//! Handler for health check endpoint.

use axum::Json;

use crate::api::dto::health::HealthResponse;

/// Reports that the process is up.
///
/// # Endpoint
///
/// `GET /health`
///
/// Does not touch the database.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
