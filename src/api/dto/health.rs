//! DTOs for health check endpoint.

use serde::Serialize;

/// Liveness response: `{"status": "ok"}`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
