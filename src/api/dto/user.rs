//! DTOs for user endpoints.

use serde::Deserialize;
use serde_with::{DefaultOnNull, serde_as};
use validator::{Validate, ValidationError};

use crate::application::services::user_service::{name_constraint_violation, parse_dob};

pub use crate::application::services::UserResponse;

/// Request body for `POST /users`.
///
/// Missing or `null` fields deserialize as empty strings and fail with `required`.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    #[validate(custom(function = "validate_name_field"))]
    pub name: String,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    #[validate(custom(function = "validate_dob_field"))]
    pub dob: String,
}

/// Request body for `PUT /users/{id}`. Same rules as [`CreateUserRequest`].
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    #[validate(custom(function = "validate_name_field"))]
    pub name: String,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    #[validate(custom(function = "validate_dob_field"))]
    pub dob: String,
}

/// Length in characters: `required`, `min` (2) or `max` (100).
fn validate_name_field(name: &str) -> Result<(), ValidationError> {
    match name_constraint_violation(name) {
        Some(tag) => Err(ValidationError::new(tag)),
        None => Ok(()),
    }
}

/// `required` when empty, `datetime` when not a `YYYY-MM-DD` calendar date.
fn validate_dob_field(dob: &str) -> Result<(), ValidationError> {
    if dob.is_empty() {
        return Err(ValidationError::new("required"));
    }

    parse_dob(dob)
        .map(|_| ())
        .map_err(|_| ValidationError::new("datetime"))
}
