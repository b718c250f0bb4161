//! Article, tag and paging types as they appear on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tag; names are unique and shared between articles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

/// The author fields selected alongside an article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSummary {
    pub id: i64,
    pub email: String,
}

/// An article together with its author summary and tags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author: AuthorSummary,
    /// Sorted by name
    pub tags: Vec<Tag>,
}

impl Article {
    /// Private articles are readable by any authenticated caller (`Some`)
    pub fn is_visible_to(&self, caller: Option<i64>) -> bool {
        self.is_public || caller.is_some()
    }

    pub fn has_any_tag(&self, names: &[String]) -> bool {
        self.tags.iter().any(|tag| names.contains(&tag.name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: u32,
    pub limit: u32,
    pub has_next_page: bool,
}

/// One page of results plus paging metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn article(is_public: bool, author_id: i64) -> Article {
        let now = Utc::now();
        Article {
            id: 1,
            title: "Title".to_string(),
            content: "Body".to_string(),
            is_public,
            created_at: now,
            updated_at: now,
            author: AuthorSummary {
                id: author_id,
                email: "author@example.com".to_string(),
            },
            tags: vec![Tag { id: 3, name: "rust".to_string() }],
        }
    }

    #[test]
    fn test_private_article_hidden_from_anonymous_only() {
        let private = article(false, 5);
        assert!(!private.is_visible_to(None));
        assert!(private.is_visible_to(Some(6)));
        assert!(private.is_visible_to(Some(5)));
    }

    #[test]
    fn test_public_article_visible_to_anyone() {
        assert!(article(true, 5).is_visible_to(None));
    }

    #[test]
    fn test_has_any_tag() {
        let a = article(true, 1);
        assert!(a.has_any_tag(&["go".to_string(), "rust".to_string()]));
        assert!(!a.has_any_tag(&["go".to_string()]));
    }

    #[test]
    fn test_article_serializes_camel_case() {
        let json = serde_json::to_value(article(true, 1)).unwrap();
        assert_eq!(json["isPublic"], true);
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["author"]["email"], "author@example.com");
        assert_eq!(json["tags"][0]["name"], "rust");
    }

    #[test]
    fn test_page_meta_serializes_has_next_page() {
        let meta = PageMeta { page: 2, limit: 10, has_next_page: true };
        let json = serde_json::to_value(meta).unwrap();
        assert_eq!(json, serde_json::json!({"page": 2, "limit": 10, "hasNextPage": true}));
    }
}
