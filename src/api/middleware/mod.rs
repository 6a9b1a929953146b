//! HTTP middleware for request processing.
//!
//! Provides request ID tagging, request tracing, panic recovery and CORS.

pub mod cors;
pub mod panic;
pub mod request_id;
pub mod tracing;
