//! Shared Module
//!
//! Types and checks shared between the server and API clients. Everything
//! here is plain data with serde derives; nothing depends on the server
//! runtime.

/// Shared error types
pub mod error;

/// Users, articles, tags and paging
pub mod models;

/// Email and password checks
pub mod validation;

pub use error::SharedError;
