/**
 * Article Request Types
 *
 * Payloads accepted by the article handlers. Unknown JSON fields are
 * rejected; `validate` covers what serde cannot express.
 */

use serde::{Deserialize, Serialize};

use crate::backend::articles::query::ArticleListQuery;
use crate::shared::SharedError;

fn default_public() -> bool {
    true
}

fn require_text(field: &str, value: &str) -> Result<(), SharedError> {
    if value.trim().is_empty() {
        return Err(SharedError::validation(field, "must not be empty"));
    }
    Ok(())
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateArticleRequest {
    pub title: String,
    pub content: String,
    #[serde(default = "default_public")]
    pub is_public: bool,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl CreateArticleRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require_text("title", &self.title)?;
        require_text("content", &self.content)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_public: Option<bool>,
    pub tags: Option<Vec<String>>,
}

impl UpdateArticleRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        if let Some(title) = &self.title {
            require_text("title", title)?;
        }
        if let Some(content) = &self.content {
            require_text("content", content)?;
        }
        Ok(())
    }
}

/// Query string of `GET /articles`: `?page=&limit=&tags=a,b`
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ListArticlesParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// Comma-separated tag names
    pub tags: Option<String>,
}

impl ListArticlesParams {
    /// Page and limit after defaults, both checked to be in range
    pub fn paging(&self) -> Result<(u32, u32), SharedError> {
        let page = self.page.unwrap_or(ArticleListQuery::DEFAULT_PAGE);
        let limit = self.limit.unwrap_or(ArticleListQuery::DEFAULT_LIMIT);

        if page < 1 {
            return Err(SharedError::validation("page", "must not be less than 1"));
        }
        if limit < 1 {
            return Err(SharedError::validation("limit", "must not be less than 1"));
        }
        if limit > ArticleListQuery::MAX_LIMIT {
            return Err(SharedError::validation(
                "limit",
                format!("must not be greater than {}", ArticleListQuery::MAX_LIMIT),
            ));
        }
        Ok((page, limit))
    }

    /// Split the `tags` parameter; blank entries are ignored
    pub fn tag_names(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}
