//! Repository trait definitions for the domain layer.
//!
//! Traits define the storage contract; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - User CRUD operations
//!
//! # Testing
//!
//! See `tests/repository_user.rs` for the PostgreSQL implementation and
//! `tests/common/mod.rs` for the in-memory one used by handler tests.

pub mod user_repository;

pub use user_repository::{StorageError, UserRepository};

#[cfg(test)]
pub use user_repository::MockUserRepository;
