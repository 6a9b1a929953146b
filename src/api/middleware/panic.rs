//! Panic recovery middleware.

use std::any::Any;

use axum::{
    Json,
    body::Body,
    http::{Response, StatusCode},
    response::IntoResponse,
};
use serde_json::json;
use tower_http::catch_panic::{CatchPanicLayer, ResponseForPanic};

/// Turns a handler panic into `500 {"error": "Internal server error"}`.
///
/// The panic payload is logged, never sent to the client.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPanicResponse;

impl ResponseForPanic for JsonPanicResponse {
    type ResponseBody = Body;

    fn response_for_panic(&mut self, err: Box<dyn Any + Send + 'static>) -> Response<Body> {
        let detail = if let Some(s) = err.downcast_ref::<String>() {
            s.as_str()
        } else if let Some(s) = err.downcast_ref::<&str>() {
            *s
        } else {
            "unknown panic payload"
        };

        tracing::error!(panic = detail, "Panic recovered");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Internal server error" })),
        )
            .into_response()
    }
}

pub fn layer() -> CatchPanicLayer<JsonPanicResponse> {
    CatchPanicLayer::custom(JsonPanicResponse)
}
