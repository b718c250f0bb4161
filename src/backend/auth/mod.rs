//! Authentication Module
//!
//! This module handles user registration, login, and JWT session management,
//! plus the ownership and role checks used by other services.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs       - Module exports and documentation
//! ├── service.rs   - Register, login and current-user logic
//! ├── password.rs  - bcrypt hashing on the blocking pool
//! ├── sessions.rs  - JWT token management
//! ├── guards.rs    - Ownership and role checks
//! └── handlers/    - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: email and password → user created with USER role → JWT returned
//! 2. **Login**: email and password → credentials verified → JWT returned
//! 3. **Me**: JWT → token verified by middleware → public user returned
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - JWT tokens are used for stateless authentication
//! - Invalid credentials return 401 (no information leakage)

pub mod guards;
pub mod handlers;
pub mod password;
pub mod service;
pub mod sessions;

pub use handlers::types::{LoginRequest, RegisterRequest, TokenResponse};
pub use handlers::{get_me, login, register};
pub use service::AuthService;
pub use sessions::{Claims, JwtKeys};
