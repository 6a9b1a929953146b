//! PostgreSQL implementation of the user repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::{StorageError, UserRepository};

#[derive(Debug, FromRow)]
struct UserRow {
    id: i32,
    name: String,
    dob: NaiveDate,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::new(row.id, row.name, row.dob)
    }
}

/// PostgreSQL repository for the `users` table.
///
/// Hard delete only; a deleted row is gone.
pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, StorageError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (name, dob)
            VALUES ($1, $2)
            RETURNING id, name, dob
            "#,
        )
        .bind(new_user.name)
        .bind(new_user.dob)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn get_by_id(&self, id: i32) -> Result<User, StorageError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, dob
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(User::from).ok_or(StorageError::NotFound)
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, StorageError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, dob
            FROM users
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn update(&self, id: i32, user: NewUser) -> Result<User, StorageError> {
        // No row back means it vanished after the caller's existence check.
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users SET
                name = $2,
                dob  = $3
            WHERE id = $1
            RETURNING id, name, dob
            "#,
        )
        .bind(id)
        .bind(user.name)
        .bind(user.dob)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(User::from).ok_or(StorageError::NotFound)
    }

    async fn delete(&self, id: i32) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    async fn count(&self) -> Result<i64, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
