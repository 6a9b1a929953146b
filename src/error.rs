//! Application error taxonomy and its HTTP mapping.
//!
//! | Variant | Status |
//! |---|---|
//! | [`AppError::BadRequest`], [`AppError::Validation`], [`AppError::InvalidDateFormat`], [`AppError::FutureDateOfBirth`] | 400 |
//! | [`AppError::UserNotFound`] | 404 |
//! | [`AppError::Storage`] | 500 |
//!
//! Every error renders as `{"error": <message>, "details"?: {<field>: <tag>}}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::collections::BTreeMap;
use validator::ValidationErrors;

/// Field name to failed-constraint tag, e.g. `{"name": "min"}`.
pub type FieldErrors = BTreeMap<String, String>;

/// JSON error body returned by every failing endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<FieldErrors>,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request body, path or query could not be deserialized.
    #[error("{message}")]
    BadRequest { message: String },

    /// One or more request fields violate their constraints.
    #[error("Validation failed")]
    Validation { details: FieldErrors },

    #[error("invalid date format")]
    InvalidDateFormat,

    #[error("date of birth cannot be in the future")]
    FutureDateOfBirth,

    #[error("User not found")]
    UserNotFound,

    /// Backing store failure; the message is returned to the caller as-is.
    #[error("{0}")]
    Storage(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Single-field validation failure.
    pub fn field(field: &str, tag: &str) -> Self {
        let mut details = FieldErrors::new();
        details.insert(field.to_string(), tag.to_string());
        Self::Validation { details }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. }
            | AppError::Validation { .. }
            | AppError::InvalidDateFormat
            | AppError::FutureDateOfBirth => StatusCode::BAD_REQUEST,
            AppError::UserNotFound => StatusCode::NOT_FOUND,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_body(&self) -> ErrorBody {
        let details = match self {
            AppError::Validation { details } => Some(details.clone()),
            _ => None,
        };

        ErrorBody {
            error: self.to_string(),
            details,
        }
    }
}

/// Keeps the first failed constraint per field.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let details = errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, errs)| {
                errs.first()
                    .map(|e| (field.to_string(), e.code.to_string()))
            })
            .collect();

        AppError::Validation { details }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_error_body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use validator::ValidationError;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::bad_request("Invalid request body").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::field("name", "min").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidDateFormat.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::FutureDateOfBirth.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Storage("connection reset".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_body_has_no_details() {
        let body = serde_json::to_value(AppError::UserNotFound.to_error_body()).unwrap();
        assert_eq!(body, json!({"error": "User not found"}));
    }

    #[test]
    fn test_validation_body_has_details() {
        let body = serde_json::to_value(AppError::field("name", "min").to_error_body()).unwrap();
        assert_eq!(
            body,
            json!({"error": "Validation failed", "details": {"name": "min"}})
        );
    }

    #[test]
    fn test_storage_message_is_verbatim() {
        let body =
            serde_json::to_value(AppError::Storage("pool timed out".to_string()).to_error_body())
                .unwrap();
        assert_eq!(body, json!({"error": "pool timed out"}));
    }

    #[test]
    fn test_from_validation_errors_uses_codes() {
        let mut errors = ValidationErrors::new();
        errors.add("name", ValidationError::new("max"));
        errors.add("dob", ValidationError::new("datetime"));

        match AppError::from(errors) {
            AppError::Validation { details } => {
                assert_eq!(details.get("name").map(String::as_str), Some("max"));
                assert_eq!(details.get("dob").map(String::as_str), Some("datetime"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
