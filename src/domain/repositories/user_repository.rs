//! Repository trait for user storage.

use crate::domain::entities::{NewUser, User};
use async_trait::async_trait;

/// Failure reported by a [`UserRepository`].
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No row matched the given id.
    #[error("user not found")]
    NotFound,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Repository interface for the `users` table.
///
/// Every call is a single round-trip with no caching or retries. Mutating
/// calls report [`StorageError::NotFound`] themselves when no row was
/// touched, so callers never depend on an earlier existence check.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a user and returns it with its assigned id.
    async fn create(&self, new_user: NewUser) -> Result<User, StorageError>;

    /// Fetches a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if no such user exists.
    async fn get_by_id(&self, id: i32) -> Result<User, StorageError>;

    /// Returns a page of users ordered by id ascending.
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, StorageError>;

    /// Replaces name and date of birth of an existing user.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if no row was updated.
    async fn update(&self, id: i32, user: NewUser) -> Result<User, StorageError>;

    /// Hard-deletes a user.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if no row was deleted.
    async fn delete(&self, id: i32) -> Result<(), StorageError>;

    /// Total number of stored users.
    async fn count(&self) -> Result<i64, StorageError>;
}
