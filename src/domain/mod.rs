//! Domain layer containing business entities and storage contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`clock`] - Current-date source
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on the API layer
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])

pub mod clock;
pub mod entities;
pub mod repositories;
