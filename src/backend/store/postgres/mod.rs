//! PostgreSQL repositories
//!
//! Raw SQL through `sqlx::query` / `sqlx::query_as` with positional binds;
//! the schema lives in `migrations/` and is applied at startup.

mod articles;
mod tags;
mod users;

pub use articles::PgArticleRepository;
pub use tags::PgTagRepository;
pub use users::PgUserRepository;

use crate::backend::store::StoreError;

/// Turn a unique-constraint violation (`23505`) into a conflict
pub(crate) fn map_unique_violation(err: sqlx::Error, message: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            tracing::warn!("Unique constraint violated: {:?}", db_err.constraint());
            return StoreError::conflict(message);
        }
    }
    StoreError::Database(err)
}
