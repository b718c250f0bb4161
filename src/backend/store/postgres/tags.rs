//! Tag database operations.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::backend::store::{StoreResult, TagRepository};
use crate::shared::models::Tag;

fn tag_from_row(row: &PgRow) -> Tag {
    Tag {
        id: row.get("id"),
        name: row.get("name"),
    }
}

#[derive(Clone)]
pub struct PgTagRepository {
    pool: PgPool,
}

impl PgTagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for PgTagRepository {
    async fn find_by_names(&self, names: &[String]) -> StoreResult<Vec<Tag>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name
            FROM tag
            WHERE name = ANY($1)
            ORDER BY name ASC
            "#,
        )
        .bind(names)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(tag_from_row).collect())
    }

    async fn create_many(&self, names: &[String]) -> StoreResult<Vec<Tag>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query(
            r#"
            INSERT INTO tag (name)
            SELECT UNNEST($1::text[])
            ON CONFLICT (name) DO NOTHING
            RETURNING id, name
            "#,
        )
        .bind(names)
        .fetch_all(&self.pool)
        .await?;

        let mut tags: Vec<Tag> = rows.iter().map(tag_from_row).collect();

        // Names inserted by a concurrent request come back empty from
        // DO NOTHING; read them instead.
        if tags.len() < names.len() {
            let raced: Vec<String> = names
                .iter()
                .filter(|name| !tags.iter().any(|t| &t.name == *name))
                .cloned()
                .collect();
            tracing::debug!("Re-reading {} concurrently created tags", raced.len());
            tags.extend(self.find_by_names(&raced).await?);
        }

        Ok(tags)
    }

    async fn list_all(&self) -> StoreResult<Vec<Tag>> {
        let rows = sqlx::query("SELECT id, name FROM tag ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(tag_from_row).collect())
    }
}
