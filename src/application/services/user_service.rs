//! User management service.
//!
//! Validates input, orchestrates repository calls, computes the derived `age`
//! field and maps storage failures onto [`AppError`].

use crate::domain::clock::{Clock, SystemClock};
use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::{StorageError, UserRepository};
use crate::error::AppError;
use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use std::sync::{Arc, LazyLock};
use tracing::{Span, instrument};

/// Wire format for dates, both in requests and responses.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 100;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Strict `YYYY-MM-DD` shape; chrono alone would also accept unpadded fields.
static DATE_SHAPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));

/// User representation returned by the service.
///
/// `age` is only filled in by single-record reads and listings; create and
/// update responses leave it out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub dob: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
}

impl UserResponse {
    fn without_age(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            dob: format_dob(user.dob),
            age: None,
        }
    }

    fn with_age(user: User, today: NaiveDate) -> Self {
        let age = user.age_on(today);
        Self {
            age: Some(age),
            ..Self::without_age(user)
        }
    }
}

/// Parses a `YYYY-MM-DD` date of birth.
///
/// # Errors
///
/// Returns [`AppError::InvalidDateFormat`] for anything that is not a real
/// calendar date in exactly that layout.
pub fn parse_dob(raw: &str) -> Result<NaiveDate, AppError> {
    if !DATE_SHAPE_REGEX.is_match(raw) {
        return Err(AppError::InvalidDateFormat);
    }

    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| AppError::InvalidDateFormat)
}

pub fn format_dob(dob: NaiveDate) -> String {
    dob.format(DATE_FORMAT).to_string()
}

/// Checks the name length in characters.
///
/// # Errors
///
/// Returns [`AppError::Validation`] with tag `required`, `min` or `max` for `name`.
pub fn validate_name(name: &str) -> Result<(), AppError> {
    match name_constraint_violation(name) {
        Some(tag) => Err(AppError::field("name", tag)),
        None => Ok(()),
    }
}

/// Tag of the first name constraint `name` violates, if any.
pub fn name_constraint_violation(name: &str) -> Option<&'static str> {
    let len = name.chars().count();

    if len == 0 {
        Some("required")
    } else if len < NAME_MIN_CHARS {
        Some("min")
    } else if len > NAME_MAX_CHARS {
        Some("max")
    } else {
        None
    }
}

/// Silently corrects out-of-range pagination and returns `(limit, offset)`.
///
/// `page` below 1 becomes 1; `limit` outside `1..=100` becomes 10.
pub fn clamp_pagination(page: i64, limit: i64) -> (i64, i64) {
    let page = if page < 1 { DEFAULT_PAGE } else { page };
    let limit = if (1..=MAX_LIMIT).contains(&limit) {
        limit
    } else {
        DEFAULT_LIMIT
    };

    let offset = (page - 1).saturating_mul(limit);

    (limit, offset)
}

/// Service for creating, reading, updating and deleting users.
///
/// Holds no mutable state; safe to share behind an `Arc` across requests.
/// Dropping any returned future aborts the storage call in flight.
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
    span: Span,
}

impl UserService {
    /// Creates a service using the system clock.
    ///
    /// Every operation runs in its own `user_service` span, nested in the
    /// caller's current span (the HTTP request span, with its request id) and
    /// linked to `span` through `follows_from`.
    pub fn new(repository: Arc<dyn UserRepository>, span: Span) -> Self {
        Self::with_clock(repository, Arc::new(SystemClock), span)
    }

    pub fn with_clock(
        repository: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
        span: Span,
    ) -> Self {
        Self {
            repository,
            clock,
            span,
        }
    }

    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the name length is out of range.
    /// Returns [`AppError::InvalidDateFormat`] if `dob` is not `YYYY-MM-DD`.
    /// Returns [`AppError::FutureDateOfBirth`] if `dob` is after today.
    /// Returns [`AppError::Storage`] on database errors.
    #[instrument(
        name = "user_service",
        skip_all,
        fields(operation = "create"),
        follows_from = [&self.span]
    )]
    pub async fn create_user(&self, name: String, dob: &str) -> Result<UserResponse, AppError> {
        validate_name(&name)?;
        let dob = self.parse_past_dob(dob)?;

        let user = self
            .repository
            .create(NewUser { name, dob })
            .await
            .map_err(|e| self.storage_error("create", None, e))?;

        tracing::info!(user_id = user.id, "User created successfully");

        Ok(UserResponse::without_age(user))
    }

    /// Retrieves a user together with their current age.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UserNotFound`] if the user does not exist.
    /// Returns [`AppError::Storage`] on database errors.
    #[instrument(
        name = "user_service",
        skip_all,
        fields(operation = "get", user_id = id),
        follows_from = [&self.span]
    )]
    pub async fn get_user_by_id(&self, id: i32) -> Result<UserResponse, AppError> {
        let user = self
            .repository
            .get_by_id(id)
            .await
            .map_err(|e| self.storage_error("get", Some(id), e))?;

        Ok(UserResponse::with_age(user, self.clock.today()))
    }

    /// Lists a page of users, each with their current age.
    ///
    /// Out-of-range `page` and `limit` are clamped, never rejected.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    #[instrument(
        name = "user_service",
        skip_all,
        fields(operation = "list", page = page, limit = limit),
        follows_from = [&self.span]
    )]
    pub async fn list_users(&self, page: i64, limit: i64) -> Result<Vec<UserResponse>, AppError> {
        let (limit, offset) = clamp_pagination(page, limit);

        let users = self
            .repository
            .list(limit, offset)
            .await
            .map_err(|e| self.storage_error("list", None, e))?;

        let today = self.clock.today();
        Ok(users
            .into_iter()
            .map(|user| UserResponse::with_age(user, today))
            .collect())
    }

    /// Total number of users.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    #[instrument(
        name = "user_service",
        skip_all,
        fields(operation = "count"),
        follows_from = [&self.span]
    )]
    pub async fn count_users(&self) -> Result<i64, AppError> {
        self.repository
            .count()
            .await
            .map_err(|e| self.storage_error("count", None, e))
    }

    /// Replaces name and date of birth of an existing user.
    ///
    /// The existence check runs first so that a missing user is reported
    /// before input errors. A user deleted between that check and the
    /// update is still reported as [`AppError::UserNotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UserNotFound`] if the user does not exist.
    /// Returns the same validation errors as [`Self::create_user`].
    /// Returns [`AppError::Storage`] on database errors.
    #[instrument(
        name = "user_service",
        skip_all,
        fields(operation = "update", user_id = id),
        follows_from = [&self.span]
    )]
    pub async fn update_user(
        &self,
        id: i32,
        name: String,
        dob: &str,
    ) -> Result<UserResponse, AppError> {
        self.ensure_exists(id).await?;

        validate_name(&name)?;
        let dob = self.parse_past_dob(dob)?;

        let user = self
            .repository
            .update(id, NewUser { name, dob })
            .await
            .map_err(|e| self.storage_error("update", Some(id), e))?;

        tracing::info!(user_id = user.id, "User updated successfully");

        Ok(UserResponse::without_age(user))
    }

    /// Hard-deletes a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UserNotFound`] if the user does not exist, including
    /// when it disappears between the existence check and the delete.
    /// Returns [`AppError::Storage`] on database errors.
    #[instrument(
        name = "user_service",
        skip_all,
        fields(operation = "delete", user_id = id),
        follows_from = [&self.span]
    )]
    pub async fn delete_user(&self, id: i32) -> Result<(), AppError> {
        self.ensure_exists(id).await?;

        self.repository
            .delete(id)
            .await
            .map_err(|e| self.storage_error("delete", Some(id), e))?;

        tracing::info!(user_id = id, "User deleted successfully");

        Ok(())
    }

    async fn ensure_exists(&self, id: i32) -> Result<(), AppError> {
        self.repository
            .get_by_id(id)
            .await
            .map(|_| ())
            .map_err(|e| self.storage_error("get", Some(id), e))
    }

    fn parse_past_dob(&self, raw: &str) -> Result<NaiveDate, AppError> {
        let dob = parse_dob(raw)?;

        if dob > self.clock.today() {
            return Err(AppError::FutureDateOfBirth);
        }

        Ok(dob)
    }

    /// Maps a storage failure, logging backend faults with their context.
    fn storage_error(
        &self,
        operation: &'static str,
        id: Option<i32>,
        err: StorageError,
    ) -> AppError {
        match err {
            StorageError::NotFound => {
                tracing::debug!(operation, user_id = id, "User not found");
                AppError::UserNotFound
            }
            StorageError::Database(e) => {
                tracing::error!(
                    operation,
                    user_id = id,
                    error = %e,
                    "Storage operation failed"
                );
                AppError::Storage(e.to_string())
            }
        }
    }
}
