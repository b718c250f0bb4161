//! Common test utilities and helpers
//!
//! This module provides shared utilities for the HTTP tests:
//! - Test server construction over the in-memory store
//! - Authentication helpers (register, login, seeded admins)
//! - Assertion helpers for the JSON error body
#![allow(dead_code)]

pub mod assertions;
pub mod auth_helpers;
pub mod server;

pub use assertions::*;
pub use auth_helpers::*;
pub use server::*;
