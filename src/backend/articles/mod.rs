//! Articles Module
//!
//! Articles with tags, listed with pagination and visibility rules.
//!
//! - **`types`** - request payloads and list query parameters
//! - **`query`** - list query model and its SQL rendering
//! - **`tags`** - find-or-create tag reconciliation
//! - **`service`** - business rules (visibility, ownership)
//! - **`handlers`** - HTTP handlers

pub mod handlers;
pub mod query;
pub mod service;
pub mod tags;
pub mod types;

pub use service::ArticleService;
