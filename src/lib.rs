//! Quillpost - Blog API Library
//!
//! A REST backend for a small blogging platform: users register and log in
//! with JWT bearer tokens, write public or private articles, and tag them.
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types, validation and errors usable by any client
//!   - Users, roles, articles, tags, pages
//!   - Email and password checks
//!
//! - **`backend`** - Axum server
//!   - Auth, articles, users
//!   - PostgreSQL (`sqlx`) and in-memory stores
//!   - Rate limiting, CORS and security headers
//!
//! # Usage
//!
//! ```rust,no_run
//! use quillpost::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
