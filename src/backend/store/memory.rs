//! In-memory repositories
//!
//! All three repositories share one set of tables behind a `tokio` `RwLock`,
//! so cascades (deleting a user removes their articles) and joins (an article
//! carries its author's email) behave like the relational schema.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::backend::articles::query::ArticleListQuery;
use crate::backend::store::{
    ArticleChanges, ArticleRepository, NewArticle, NewUser, StoreError, StoreResult,
    TagRepository, UserChanges, UserRepository,
};
use crate::shared::models::{Article, AuthorSummary, Tag, User};

#[derive(Debug, Clone)]
struct ArticleRecord {
    id: i64,
    title: String,
    content: String,
    is_public: bool,
    author_id: i64,
    tag_ids: Vec<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    articles: BTreeMap<i64, ArticleRecord>,
    tags: BTreeMap<i64, Tag>,
    last_user_id: i64,
    last_article_id: i64,
    last_tag_id: i64,
}

impl Tables {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }

    fn tag_by_name(&self, name: &str) -> Option<&Tag> {
        self.tags.values().find(|t| t.name == name)
    }

    /// Joins the author and tags onto a record; `None` if the author is gone
    fn hydrate(&self, record: &ArticleRecord) -> Option<Article> {
        let author = self.users.get(&record.author_id)?;
        let mut tags: Vec<Tag> = record
            .tag_ids
            .iter()
            .filter_map(|id| self.tags.get(id).cloned())
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));

        Some(Article {
            id: record.id,
            title: record.title.clone(),
            content: record.content.clone(),
            is_public: record.is_public,
            created_at: record.created_at,
            updated_at: record.updated_at,
            author: AuthorSummary {
                id: author.id,
                email: author.email.clone(),
            },
            tags,
        })
    }
}

fn dedup_ids(ids: Vec<i64>) -> Vec<i64> {
    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: NewUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(&user.email, None) {
            return Err(StoreError::conflict("User with this email already exists"));
        }

        tables.last_user_id += 1;
        let created = User {
            id: tables.last_user_id,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            created_at: Utc::now(),
        };
        tables.users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn update(&self, id: i64, changes: UserChanges) -> StoreResult<Option<User>> {
        let mut tables = self.tables.write().await;
        if let Some(email) = &changes.email {
            if tables.email_taken(email, Some(id)) {
                return Err(StoreError::conflict("User with this email already exists"));
            }
        }

        let Some(user) = tables.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(password_hash) = changes.password_hash {
            user.password_hash = password_hash;
        }
        if let Some(role) = changes.role {
            user.role = role;
        }
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }
        tables.articles.retain(|_, article| article.author_id != id);
        Ok(true)
    }
}

#[async_trait]
impl ArticleRepository for MemoryStore {
    async fn create(&self, article: NewArticle) -> StoreResult<Article> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&article.author_id) {
            return Err(StoreError::Database(sqlx::Error::RowNotFound));
        }

        tables.last_article_id += 1;
        let now = Utc::now();
        let record = ArticleRecord {
            id: tables.last_article_id,
            title: article.title,
            content: article.content,
            is_public: article.is_public,
            author_id: article.author_id,
            tag_ids: dedup_ids(article.tag_ids),
            created_at: now,
            updated_at: now,
        };
        tables.articles.insert(record.id, record.clone());
        tables
            .hydrate(&record)
            .ok_or(StoreError::Database(sqlx::Error::RowNotFound))
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Article>> {
        let tables = self.tables.read().await;
        Ok(tables
            .articles
            .get(&id)
            .and_then(|record| tables.hydrate(record)))
    }

    async fn list(&self, query: &ArticleListQuery) -> StoreResult<Vec<Article>> {
        let tables = self.tables.read().await;
        let mut matching: Vec<Article> = tables
            .articles
            .values()
            .filter_map(|record| tables.hydrate(record))
            .filter(|article| query.matches(article))
            .collect();
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(matching
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.fetch_limit() as usize)
            .collect())
    }

    async fn update(&self, id: i64, changes: ArticleChanges) -> StoreResult<Option<Article>> {
        let mut tables = self.tables.write().await;
        let Some(record) = tables.articles.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = changes.title {
            record.title = title;
        }
        if let Some(content) = changes.content {
            record.content = content;
        }
        if let Some(is_public) = changes.is_public {
            record.is_public = is_public;
        }
        if let Some(tag_ids) = changes.tag_ids {
            record.tag_ids = dedup_ids(tag_ids);
        }
        record.updated_at = Utc::now();

        let record = record.clone();
        Ok(tables.hydrate(&record))
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        Ok(self.tables.write().await.articles.remove(&id).is_some())
    }
}

#[async_trait]
impl TagRepository for MemoryStore {
    async fn find_by_names(&self, names: &[String]) -> StoreResult<Vec<Tag>> {
        let tables = self.tables.read().await;
        let mut found: Vec<Tag> = tables
            .tags
            .values()
            .filter(|tag| names.contains(&tag.name))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }

    async fn create_many(&self, names: &[String]) -> StoreResult<Vec<Tag>> {
        let mut tables = self.tables.write().await;
        let mut created = Vec::with_capacity(names.len());
        for name in names {
            if let Some(existing) = tables.tag_by_name(name) {
                created.push(existing.clone());
                continue;
            }
            tables.last_tag_id += 1;
            let tag = Tag {
                id: tables.last_tag_id,
                name: name.clone(),
            };
            tables.tags.insert(tag.id, tag.clone());
            created.push(tag);
        }
        Ok(created)
    }

    async fn list_all(&self) -> StoreResult<Vec<Tag>> {
        let tables = self.tables.read().await;
        let mut tags: Vec<Tag> = tables.tags.values().cloned().collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }
}
