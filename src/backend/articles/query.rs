/**
 * Article Listing Query
 *
 * `ArticleListQuery` describes one page of the article listing: who is
 * asking (visibility), which tags to match, and which page. It renders
 * itself to SQL for the PostgreSQL store and evaluates itself against
 * hydrated articles for the in-memory store, so both stores agree on what a
 * page contains.
 *
 * # Filters
 *
 * - Visibility: anonymous callers see public articles only; any
 *   authenticated caller sees every article.
 * - Tags: an article matches when it carries at least one requested tag.
 *
 * # Paging
 *
 * Rows are ordered newest first (`created_at DESC, id DESC`). The store is
 * asked for `limit + 1` rows; the extra row only decides `hasNextPage` and
 * is dropped by [`ArticleListQuery::into_page`].
 */

use sqlx::{Postgres, QueryBuilder};

use crate::shared::models::{Article, Page, PageMeta};

/// Article columns plus author id/email, shared by every article read
pub const ARTICLE_SELECT: &str = r#"SELECT a.id, a.title, a.content, a.is_public, a.created_at, a.updated_at, a.author_id, u.email AS author_email FROM articles a INNER JOIN "user" u ON u.id = a.author_id"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    PublicOnly,
    All,
}

impl Visibility {
    pub fn for_caller(caller: Option<i64>) -> Self {
        if caller.is_some() {
            Visibility::All
        } else {
            Visibility::PublicOnly
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleListQuery {
    visibility: Visibility,
    tags: Vec<String>,
    page: u32,
    limit: u32,
}

impl ArticleListQuery {
    pub const DEFAULT_PAGE: u32 = 1;
    pub const DEFAULT_LIMIT: u32 = 10;
    pub const MAX_LIMIT: u32 = 100;

    pub fn new(visibility: Visibility) -> Self {
        Self {
            visibility,
            tags: Vec::new(),
            page: Self::DEFAULT_PAGE,
            limit: Self::DEFAULT_LIMIT,
        }
    }

    /// Restrict to articles carrying any of `tags`; an empty list disables the filter
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// `page` and `limit` are clamped to at least 1
    pub fn paginate(mut self, page: u32, limit: u32) -> Self {
        self.page = page.max(1);
        self.limit = limit.max(1);
        self
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.limit)
    }

    /// One row more than the page size, for next-page detection
    pub fn fetch_limit(&self) -> i64 {
        i64::from(self.limit) + 1
    }

    /// Whether `article` passes the visibility and tag filters
    pub fn matches(&self, article: &Article) -> bool {
        let visible = match self.visibility {
            Visibility::PublicOnly => article.is_public,
            Visibility::All => true,
        };
        visible && (self.tags.is_empty() || article.has_any_tag(&self.tags))
    }

    pub fn build_sql(&self) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new(ARTICLE_SELECT);
        builder.push(" WHERE TRUE");

        if self.visibility == Visibility::PublicOnly {
            builder.push(" AND a.is_public = TRUE");
        }

        if !self.tags.is_empty() {
            builder.push(
                " AND EXISTS (SELECT 1 FROM article_tags art \
                 INNER JOIN tag t ON t.id = art.tag_id \
                 WHERE art.article_id = a.id AND t.name = ANY(",
            );
            builder.push_bind(self.tags.clone());
            builder.push("))");
        }

        builder.push(" ORDER BY a.created_at DESC, a.id DESC LIMIT ");
        builder.push_bind(self.fetch_limit());
        builder.push(" OFFSET ");
        builder.push_bind(self.offset());
        builder
    }

    /// Trim the lookahead row and wrap the rest with paging metadata
    pub fn into_page(&self, mut rows: Vec<Article>) -> Page<Article> {
        let has_next_page = rows.len() > self.limit as usize;
        rows.truncate(self.limit as usize);

        Page {
            data: rows,
            meta: PageMeta {
                page: self.page,
                limit: self.limit,
                has_next_page,
            },
        }
    }
}
