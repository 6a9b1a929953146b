//! Handlers for user CRUD endpoints.
//!
//! Extractor rejections are turned into `400 {"error": ...}` here instead of
//! axum's plain-text defaults, so every error shares one JSON shape.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::pagination::PaginationQuery;
use crate::api::dto::user::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Response header carrying the total number of users on list requests.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

fn user_id(path: Result<Path<i32>, PathRejection>) -> Result<i32, AppError> {
    path.map(|Path(id)| id)
        .map_err(|_| AppError::bad_request("Invalid user ID"))
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|_| AppError::bad_request("Invalid request body"))
}

/// Creates a user.
///
/// # Endpoint
///
/// `POST /users`
///
/// # Request Body
///
/// ```json
/// { "name": "Alice", "dob": "1990-05-15" }
/// ```
///
/// # Response
///
/// `201 Created` with `{"id": 1, "name": "Alice", "dob": "1990-05-15"}`.
/// The body never contains `age`.
///
/// # Errors
///
/// Returns 400 if the body is malformed, a field is invalid, or `dob` is in the future.
/// Returns 500 on database errors.
pub async fn create_user_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let payload = json_body(payload)?;
    payload.validate()?;

    let user = state
        .user_service
        .create_user(payload.name, &payload.dob)
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Returns a single user including `age`.
///
/// # Endpoint
///
/// `GET /users/{id}`
///
/// # Errors
///
/// Returns 400 if `id` is not a 32-bit integer.
/// Returns 404 if the user does not exist.
pub async fn get_user_handler(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<UserResponse>, AppError> {
    let id = user_id(path)?;

    let user = state.user_service.get_user_by_id(id).await?;

    Ok(Json(user))
}

/// Lists users ordered by id, each including `age`.
///
/// # Endpoint
///
/// `GET /users?page=1&limit=10`
///
/// Out-of-range or empty values fall back to `page=1` / `limit=10`. The total
/// number of users is returned in the `X-Total-Count` header. The page and the
/// count are two concurrent storage calls, and a failure of either fails the
/// request.
///
/// # Errors
///
/// Returns 400 if `page` or `limit` is not an integer.
/// Returns 500 if either storage call fails.
pub async fn list_users_handler(
    State(state): State<AppState>,
    query: Result<Query<PaginationQuery>, QueryRejection>,
) -> Result<([(&'static str, String); 1], Json<Vec<UserResponse>>), AppError> {
    let Query(pagination) =
        query.map_err(|_| AppError::bad_request("Invalid query parameters"))?;

    let (users, total) = tokio::join!(
        state
            .user_service
            .list_users(pagination.page(), pagination.limit()),
        state.user_service.count_users(),
    );
    let (users, total) = (users?, total?);

    Ok(([(TOTAL_COUNT_HEADER, total.to_string())], Json(users)))
}

/// Replaces a user's name and date of birth.
///
/// # Endpoint
///
/// `PUT /users/{id}`
///
/// The response body never contains `age`.
///
/// # Errors
///
/// Returns 400 on malformed input or invalid fields.
/// Returns 404 if the user does not exist.
pub async fn update_user_handler(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, AppError> {
    let id = user_id(path)?;
    let payload = json_body(payload)?;
    payload.validate()?;

    let user = state
        .user_service
        .update_user(id, payload.name, &payload.dob)
        .await?;

    Ok(Json(user))
}

/// Hard-deletes a user.
///
/// # Endpoint
///
/// `DELETE /users/{id}`
///
/// # Errors
///
/// Returns 404 if the user does not exist.
pub async fn delete_user_handler(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let id = user_id(path)?;

    state.user_service.delete_user(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
