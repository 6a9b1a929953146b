//! Application layer services implementing business logic.
//!
//! Services consume repository traits, apply validation and business rules,
//! and provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::user_service::UserService`] - User CRUD with derived age

pub mod services;
