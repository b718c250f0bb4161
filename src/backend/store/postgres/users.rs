/**
 * User Database Operations
 *
 * `sqlx` implementation of [`UserRepository`] over the `"user"` table.
 * The table name is a reserved word in PostgreSQL and is always quoted.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::backend::store::postgres::map_unique_violation;
use crate::backend::store::{NewUser, StoreResult, UserChanges, UserRepository};
use crate::shared::models::{Role, User};

const EMAIL_TAKEN: &str = "User with this email already exists";

/// Row shape of the `"user"` table
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    password: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = sqlx::Error;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = row
            .role
            .parse::<Role>()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        Ok(User {
            id: row.id,
            email: row.email,
            password_hash: row.password,
            role,
            created_at: row.created_at,
        })
    }
}

fn into_user(row: Option<UserRow>) -> StoreResult<Option<User>> {
    Ok(row.map(User::try_from).transpose()?)
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    /// Create a new user
    ///
    /// # Returns
    /// Created user, or `StoreError::Conflict` if the email is taken
    async fn create(&self, user: NewUser) -> StoreResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO "user" (email, password, role, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, password, role, created_at
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, EMAIL_TAKEN))?;

        Ok(User::try_from(row)?)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password, role, created_at
            FROM "user"
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        into_user(row)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password, role, created_at
            FROM "user"
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        into_user(row)
    }

    /// Apply a partial update
    ///
    /// # Returns
    /// Updated user, `None` if no user has this id
    async fn update(&self, id: i64, changes: UserChanges) -> StoreResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE "user"
            SET email = COALESCE($1, email),
                password = COALESCE($2, password),
                role = COALESCE($3, role)
            WHERE id = $4
            RETURNING id, email, password, role, created_at
            "#,
        )
        .bind(changes.email)
        .bind(changes.password_hash)
        .bind(changes.role.map(|role| role.as_str()))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, EMAIL_TAKEN))?;

        into_user(row)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query(r#"DELETE FROM "user" WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
