//! PostgreSQL repository tests.
//!
//! Run with a database available:
//! `DATABASE_URL=postgres://... cargo test --test repository_user -- --ignored`

use chrono::NaiveDate;
use sqlx::PgPool;
use std::sync::Arc;
use users_api::domain::entities::NewUser;
use users_api::domain::repositories::{StorageError, UserRepository};
use users_api::infrastructure::persistence::PgUserRepository;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_user(name: &str, dob: NaiveDate) -> NewUser {
    NewUser {
        name: name.to_string(),
        dob,
    }
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_and_get(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let created = repo
        .create(new_user("Alice", date(1990, 5, 15)))
        .await
        .unwrap();
    let fetched = repo.get_by_id(created.id).await.unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched.name, "Alice");
    assert_eq!(fetched.dob, date(1990, 5, 15));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_get_missing_is_not_found(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let result = repo.get_by_id(999).await;

    assert!(matches!(result, Err(StorageError::NotFound)));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_list_is_ordered_by_id(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    for name in ["Carol", "Alice", "Bob"] {
        repo.create(new_user(name, date(1990, 1, 1))).await.unwrap();
    }

    let first_page = repo.list(2, 0).await.unwrap();
    let second_page = repo.list(2, 2).await.unwrap();

    let names: Vec<_> = first_page.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["Carol", "Alice"]);
    assert_eq!(second_page.len(), 1);
    assert_eq!(second_page[0].name, "Bob");
    assert!(first_page[0].id < first_page[1].id);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_update_replaces_fields(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    let created = repo
        .create(new_user("Alice", date(1990, 5, 15)))
        .await
        .unwrap();

    let updated = repo
        .update(created.id, new_user("Alicia", date(1991, 2, 3)))
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Alicia");
    assert_eq!(updated.dob, date(1991, 2, 3));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_update_missing_is_not_found(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let result = repo.update(42, new_user("Ghost", date(1990, 1, 1))).await;

    assert!(matches!(result, Err(StorageError::NotFound)));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_delete_and_count(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    let a = repo
        .create(new_user("Alice", date(1990, 5, 15)))
        .await
        .unwrap();
    repo.create(new_user("Bob", date(1985, 3, 1))).await.unwrap();

    assert_eq!(repo.count().await.unwrap(), 2);

    repo.delete(a.id).await.unwrap();

    assert_eq!(repo.count().await.unwrap(), 1);
    assert!(matches!(
        repo.delete(a.id).await,
        Err(StorageError::NotFound)
    ));
}
