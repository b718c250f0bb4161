//! Server Module
//!
//! This module contains the code for configuring and initializing the Axum
//! HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs      - Module exports and documentation
//! ├── state.rs    - AppState and FromRef implementations
//! ├── config.rs   - Environment configuration and database connection
//! └── init.rs     - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `.env` files, then `ServerConfig::from_env`
//! 2. **Store Selection**: PostgreSQL with migrations, or in-memory
//! 3. **State Creation**: services over the selected store
//! 4. **Router Creation**: routes and middleware
//! 5. **Background Tasks**: rate-limit window cleanup

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::{ConfigError, ServerConfig};
pub use init::{build_app, build_state, create_app, StartupError};
pub use state::AppState;
