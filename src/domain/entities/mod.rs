//! Core domain entities.
//!
//! Entities are plain data structures. Creation input lives in a separate
//! `New*` struct so that storage-assigned fields never appear in requests.
//!
//! - [`User`] - A persisted user record
//! - [`NewUser`] - Name and date of birth for create/replace

pub mod user;

pub use user::{NewUser, User, calculate_age};
