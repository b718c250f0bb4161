//! Middleware Module
//!
//! This module contains all HTTP middleware for the backend server.
//!
//! # Architecture
//!
//! - **`auth`** - Optional bearer-token authentication, the `AuthUser` and
//!   `MaybeAuthUser` extractors, and the ADMIN route guard
//! - **`rate_limit`** - Fixed-window request limiting per client

pub mod auth;
pub mod rate_limit;

pub use auth::{auth_middleware, require_admin, AuthUser, AuthenticatedUser, MaybeAuthUser};
pub use rate_limit::{rate_limit_middleware, RateLimiter};
