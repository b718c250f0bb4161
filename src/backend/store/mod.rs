//! Storage Module
//!
//! Repository traits for users, articles and tags, plus two implementations:
//!
//! - **`postgres`** - `sqlx` queries against the relational schema in
//!   `migrations/`
//! - **`memory`** - process-local tables, used when no database is configured
//!   and by the HTTP tests
//!
//! Services receive the repositories as `Arc<dyn ...>` through [`Store`], so
//! nothing above this module knows which backend is in use.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use crate::backend::articles::query::ArticleListQuery;
use crate::shared::models::{Article, Role, Tag, User};

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint rejected the write
    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Partial user update; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<Role>,
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub is_public: bool,
    pub author_id: i64,
    pub tag_ids: Vec<i64>,
}

/// Partial article update; `tag_ids: Some(..)` replaces the whole tag set
#[derive(Debug, Clone, Default)]
pub struct ArticleChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_public: Option<bool>,
    pub tag_ids: Option<Vec<i64>>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with [`StoreError::Conflict`] when the email is taken
    async fn create(&self, user: NewUser) -> StoreResult<User>;
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    async fn update(&self, id: i64, changes: UserChanges) -> StoreResult<Option<User>>;
    /// Removes the user and, by cascade, their articles. Returns whether a row was deleted.
    async fn delete(&self, id: i64) -> StoreResult<bool>;
}

#[async_trait]
pub trait ArticleRepository: Send + Sync {
    async fn create(&self, article: NewArticle) -> StoreResult<Article>;
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Article>>;
    /// Returns up to `query.fetch_limit()` rows so the caller can detect a next page
    async fn list(&self, query: &ArticleListQuery) -> StoreResult<Vec<Article>>;
    async fn update(&self, id: i64, changes: ArticleChanges) -> StoreResult<Option<Article>>;
    async fn delete(&self, id: i64) -> StoreResult<bool>;
}

#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn find_by_names(&self, names: &[String]) -> StoreResult<Vec<Tag>>;
    /// Creates the named tags. A name created concurrently by another
    /// request is returned as the existing row rather than failing.
    async fn create_many(&self, names: &[String]) -> StoreResult<Vec<Tag>>;
    async fn list_all(&self) -> StoreResult<Vec<Tag>>;
}

/// The repositories handed to services
#[derive(Clone)]
pub struct Store {
    pub users: Arc<dyn UserRepository>,
    pub articles: Arc<dyn ArticleRepository>,
    pub tags: Arc<dyn TagRepository>,
    kind: &'static str,
}

impl Store {
    pub fn memory() -> Self {
        let store = memory::MemoryStore::default();
        Self {
            users: Arc::new(store.clone()),
            articles: Arc::new(store.clone()),
            tags: Arc::new(store),
            kind: "memory",
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(postgres::PgUserRepository::new(pool.clone())),
            articles: Arc::new(postgres::PgArticleRepository::new(pool.clone())),
            tags: Arc::new(postgres::PgTagRepository::new(pool)),
            kind: "postgres",
        }
    }

    /// `"memory"` or `"postgres"`
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}
