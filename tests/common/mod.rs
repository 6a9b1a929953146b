#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use users_api::application::services::UserService;
use users_api::domain::clock::FixedClock;
use users_api::domain::entities::{NewUser, User};
use users_api::domain::repositories::{StorageError, UserRepository};
use users_api::state::AppState;

/// Date the handler tests treat as "today".
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

#[derive(Default)]
struct Table {
    next_id: i32,
    rows: BTreeMap<i32, User>,
}

/// `UserRepository` backed by a map, with a switch to simulate backend outages.
#[derive(Default)]
pub struct InMemoryUserRepository {
    table: Mutex<Table>,
    failing: AtomicBool,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with a database error.
    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.table.lock().unwrap().rows.len()
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, StorageError> {
        self.check()?;
        let mut table = self.table.lock().unwrap();
        table.next_id += 1;
        let user = User::new(table.next_id, new_user.name, new_user.dob);
        table.rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_by_id(&self, id: i32) -> Result<User, StorageError> {
        self.check()?;
        let table = self.table.lock().unwrap();
        table.rows.get(&id).cloned().ok_or(StorageError::NotFound)
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, StorageError> {
        self.check()?;
        let table = self.table.lock().unwrap();
        Ok(table
            .rows
            .values()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn update(&self, id: i32, user: NewUser) -> Result<User, StorageError> {
        self.check()?;
        let mut table = self.table.lock().unwrap();
        let row = table.rows.get_mut(&id).ok_or(StorageError::NotFound)?;
        row.name = user.name;
        row.dob = user.dob;
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), StorageError> {
        self.check()?;
        let mut table = self.table.lock().unwrap();
        table
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }

    async fn count(&self) -> Result<i64, StorageError> {
        self.check()?;
        Ok(self.table.lock().unwrap().rows.len() as i64)
    }
}

pub fn create_test_state(repository: Arc<InMemoryUserRepository>) -> AppState {
    let user_service = UserService::with_clock(
        repository,
        Arc::new(FixedClock(today())),
        tracing::Span::none(),
    );

    AppState::new(Arc::new(user_service))
}
