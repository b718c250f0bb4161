//! User management: self-service updates and admin deletion.

pub mod handlers;
pub mod service;
pub mod types;

pub use service::UserService;
