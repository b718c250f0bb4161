//! Article database operations
//!
//! Writes run in a transaction so the article row and its `article_tags`
//! links are committed together. Reads load the article rows first (with the
//! author joined in) and then the tags of exactly those rows, so pagination
//! counts articles rather than article/tag pairs.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{PgConnection, PgPool, Row};

use crate::backend::articles::query::{ArticleListQuery, ARTICLE_SELECT};
use crate::backend::store::{
    ArticleChanges, ArticleRepository, NewArticle, StoreResult,
};
use crate::shared::models::{Article, AuthorSummary, Tag};

/// Map a row selected with [`ARTICLE_SELECT`]; tags are attached separately
fn article_from_row(row: &PgRow) -> Article {
    Article {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        is_public: row.get("is_public"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        author: AuthorSummary {
            id: row.get("author_id"),
            email: row.get("author_email"),
        },
        tags: Vec::new(),
    }
}

async fn attach_tags(conn: &mut PgConnection, articles: &mut [Article]) -> Result<(), sqlx::Error> {
    if articles.is_empty() {
        return Ok(());
    }

    let ids: Vec<i64> = articles.iter().map(|a| a.id).collect();
    let rows = sqlx::query(
        r#"
        SELECT art.article_id, t.id, t.name
        FROM article_tags art
        INNER JOIN tag t ON t.id = art.tag_id
        WHERE art.article_id = ANY($1)
        ORDER BY t.name ASC
        "#,
    )
    .bind(&ids[..])
    .fetch_all(&mut *conn)
    .await?;

    let mut by_article: HashMap<i64, Vec<Tag>> = HashMap::new();
    for row in rows {
        by_article
            .entry(row.get("article_id"))
            .or_default()
            .push(Tag {
                id: row.get("id"),
                name: row.get("name"),
            });
    }

    for article in articles.iter_mut() {
        article.tags = by_article.remove(&article.id).unwrap_or_default();
    }
    Ok(())
}

async fn fetch_article(conn: &mut PgConnection, id: i64) -> Result<Option<Article>, sqlx::Error> {
    let sql = format!("{} WHERE a.id = $1", ARTICLE_SELECT);
    let row = sqlx::query(&sql).bind(id).fetch_optional(&mut *conn).await?;

    let Some(row) = row else {
        return Ok(None);
    };
    let mut articles = [article_from_row(&row)];
    attach_tags(conn, &mut articles).await?;
    let [article] = articles;
    Ok(Some(article))
}

async fn link_tags(conn: &mut PgConnection, article_id: i64, tag_ids: &[i64]) -> Result<(), sqlx::Error> {
    if tag_ids.is_empty() {
        return Ok(());
    }

    sqlx::query(
        r#"
        INSERT INTO article_tags (article_id, tag_id)
        SELECT $1, UNNEST($2::bigint[])
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(article_id)
    .bind(tag_ids)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

#[derive(Clone)]
pub struct PgArticleRepository {
    pool: PgPool,
}

impl PgArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleRepository for PgArticleRepository {
    async fn create(&self, article: NewArticle) -> StoreResult<Article> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO articles (title, content, is_public, author_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING id
            "#,
        )
        .bind(&article.title)
        .bind(&article.content)
        .bind(article.is_public)
        .bind(article.author_id)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        link_tags(&mut tx, id, &article.tag_ids).await?;
        let created = fetch_article(&mut tx, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;

        tx.commit().await?;
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Article>> {
        let mut conn = self.pool.acquire().await?;
        Ok(fetch_article(&mut conn, id).await?)
    }

    async fn list(&self, query: &ArticleListQuery) -> StoreResult<Vec<Article>> {
        let mut conn = self.pool.acquire().await?;

        let mut builder = query.build_sql();
        let rows = builder.build().fetch_all(&mut *conn).await?;
        let mut articles: Vec<Article> = rows.iter().map(article_from_row).collect();

        attach_tags(&mut conn, &mut articles).await?;
        Ok(articles)
    }

    async fn update(&self, id: i64, changes: ArticleChanges) -> StoreResult<Option<Article>> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE articles
            SET title = COALESCE($1, title),
                content = COALESCE($2, content),
                is_public = COALESCE($3, is_public),
                updated_at = $4
            WHERE id = $5
            "#,
        )
        .bind(changes.title)
        .bind(changes.content)
        .bind(changes.is_public)
        .bind(Utc::now())
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        if let Some(tag_ids) = changes.tag_ids {
            sqlx::query("DELETE FROM article_tags WHERE article_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            link_tags(&mut tx, id, &tag_ids).await?;
        }

        let updated = fetch_article(&mut tx, id).await?;
        tx.commit().await?;
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
