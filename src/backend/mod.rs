//! Backend Module
//!
//! The Axum HTTP server for the blog API: authentication, articles with tags,
//! and user management over a PostgreSQL or in-memory store.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - Route table and edge middleware
//! - **`auth`** - Registration, login, JWT sessions, ownership and role guards
//! - **`articles`** - Article CRUD, listing and tag reconciliation
//! - **`users`** - User updates and admin deletion
//! - **`store`** - Repository traits with PostgreSQL and in-memory backends
//! - **`middleware`** - Authentication and rate limiting
//! - **`extract`** - Extractors with JSON error rejections
//! - **`error`** - Backend error type and HTTP conversion
//!
//! # Request Flow
//!
//! ```text
//! request → trace → rate limit → CORS → security headers → auth
//!         → handler → service → repository
//! ```
//!
//! Services return `BackendError`, which renders as
//! `{ "error": <message>, "status": <code> }`.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and sessions
pub mod auth;

/// Articles and tags
pub mod articles;

/// User management
pub mod users;

/// Persistence
pub mod store;

/// Middleware for request processing
pub mod middleware;

/// Request extractors
pub mod extract;

pub use error::BackendError;
pub use server::{build_app, create_app};
