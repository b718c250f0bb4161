//! Route Configuration Module
//!
//! - **`router`** - Main router creation, fallback and edge middleware
//! - **`api_routes`** - Auth, article, tag and user endpoints

/// Main router creation
pub mod router;

/// API endpoint handlers
pub mod api_routes;

pub use router::create_router;
