/**
 * Article Service
 *
 * Create, list, read, update and delete articles, with tag reconciliation on
 * write. Visibility and ownership rules live here:
 *
 * - private articles are hidden from anonymous callers, who get 404
 * - only the author may update or delete an article; everyone else gets 403
 */

use std::sync::Arc;

use crate::backend::articles::query::{ArticleListQuery, Visibility};
use crate::backend::articles::tags::{normalize, reconcile};
use crate::backend::articles::types::{CreateArticleRequest, ListArticlesParams, UpdateArticleRequest};
use crate::backend::auth::guards::ensure_owner;
use crate::backend::error::BackendError;
use crate::backend::store::{
    ArticleChanges, ArticleRepository, NewArticle, Store, TagRepository, UserRepository,
};
use crate::shared::models::{Article, Page, Tag};

#[derive(Clone)]
pub struct ArticleService {
    articles: Arc<dyn ArticleRepository>,
    tags: Arc<dyn TagRepository>,
    users: Arc<dyn UserRepository>,
}

fn article_not_found(id: i64) -> BackendError {
    BackendError::not_found(format!("Article with id {} not found", id))
}

impl ArticleService {
    pub fn new(store: &Store) -> Self {
        Self {
            articles: store.articles.clone(),
            tags: store.tags.clone(),
            users: store.users.clone(),
        }
    }

    pub async fn create(
        &self,
        author_id: i64,
        request: CreateArticleRequest,
    ) -> Result<Article, BackendError> {
        request.validate()?;
        let names = normalize(&request.tags.unwrap_or_default())?;

        if self.users.find_by_id(author_id).await?.is_none() {
            tracing::warn!("Article author no longer exists: {}", author_id);
            return Err(BackendError::not_found("User not found"));
        }

        let tags = reconcile(self.tags.as_ref(), &names).await?;
        let article = self
            .articles
            .create(NewArticle {
                title: request.title,
                content: request.content,
                is_public: request.is_public,
                author_id,
                tag_ids: tags.iter().map(|tag| tag.id).collect(),
            })
            .await?;

        tracing::info!("Article {} created by user {}", article.id, author_id);
        Ok(article)
    }

    pub async fn find_list(
        &self,
        caller: Option<i64>,
        params: ListArticlesParams,
    ) -> Result<Page<Article>, BackendError> {
        let (page, limit) = params.paging()?;
        let query = ArticleListQuery::new(Visibility::for_caller(caller))
            .with_tags(params.tag_names())
            .paginate(page, limit);

        let rows = self.articles.list(&query).await?;
        Ok(query.into_page(rows))
    }

    pub async fn find_one(&self, id: i64, caller: Option<i64>) -> Result<Article, BackendError> {
        match self.articles.find_by_id(id).await? {
            Some(article) if article.is_visible_to(caller) => Ok(article),
            Some(_) => {
                tracing::warn!("Private article {} hidden from anonymous caller", id);
                Err(article_not_found(id))
            }
            None => Err(article_not_found(id)),
        }
    }

    pub async fn update(
        &self,
        id: i64,
        caller_id: i64,
        request: UpdateArticleRequest,
    ) -> Result<Article, BackendError> {
        request.validate()?;
        let names = request.tags.as_deref().map(normalize).transpose()?;

        let existing = self
            .articles
            .find_by_id(id)
            .await?
            .ok_or_else(|| article_not_found(id))?;
        ensure_owner(
            caller_id,
            existing.author.id,
            "You can only update your own articles",
        )?;

        let tag_ids = match names {
            Some(names) => Some(
                reconcile(self.tags.as_ref(), &names)
                    .await?
                    .into_iter()
                    .map(|tag| tag.id)
                    .collect(),
            ),
            None => None,
        };

        let article = self
            .articles
            .update(
                id,
                ArticleChanges {
                    title: request.title,
                    content: request.content,
                    is_public: request.is_public,
                    tag_ids,
                },
            )
            .await?
            .ok_or_else(|| article_not_found(id))?;

        tracing::info!("Article {} updated by user {}", id, caller_id);
        Ok(article)
    }

    pub async fn remove(&self, id: i64, caller_id: i64) -> Result<(), BackendError> {
        let existing = self
            .articles
            .find_by_id(id)
            .await?
            .ok_or_else(|| article_not_found(id))?;
        ensure_owner(
            caller_id,
            existing.author.id,
            "You can only delete your own articles",
        )?;

        if !self.articles.delete(id).await? {
            return Err(article_not_found(id));
        }

        tracing::info!("Article {} deleted by user {}", id, caller_id);
        Ok(())
    }

    pub async fn list_tags(&self) -> Result<Vec<Tag>, BackendError> {
        Ok(self.tags.list_all().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::store::NewUser;
    use crate::shared::models::Role;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    async fn setup() -> (ArticleService, Store, i64, i64) {
        let store = Store::memory();
        let mut ids = Vec::new();
        for email in ["owner@example.com", "other@example.com"] {
            let user = store
                .users
                .create(NewUser {
                    email: email.to_string(),
                    password_hash: "hash".to_string(),
                    role: Role::User,
                })
                .await
                .unwrap();
            ids.push(user.id);
        }
        (ArticleService::new(&store), store, ids[0], ids[1])
    }

    fn request(is_public: bool, tags: &[&str]) -> CreateArticleRequest {
        CreateArticleRequest {
            title: "Title".to_string(),
            content: "Body".to_string(),
            is_public,
            tags: Some(tags.iter().map(|t| t.to_string()).collect()),
        }
    }

    #[tokio::test]
    async fn test_create_links_reconciled_tags() {
        let (service, _, owner, _) = setup().await;
        let article = service.create(owner, request(true, &["b", "a", "a"])).await.unwrap();

        let names: Vec<_> = article.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(article.author.id, owner);
    }

    #[tokio::test]
    async fn test_create_for_missing_author() {
        let (service, _, _, _) = setup().await;
        let err = service.create(999, request(true, &[])).await.unwrap_err();
        assert_matches!(err, BackendError::NotFound { .. });
    }

    #[tokio::test]
    async fn test_private_article_is_not_found_for_anonymous() {
        let (service, _, owner, other) = setup().await;
        let article = service.create(owner, request(false, &[])).await.unwrap();

        assert!(service.find_one(article.id, Some(owner)).await.is_ok());
        assert!(service.find_one(article.id, Some(other)).await.is_ok());
        assert_matches!(
            service.find_one(article.id, None).await,
            Err(BackendError::NotFound { .. })
        );
    }

    #[tokio::test]
    async fn test_only_author_may_update_or_delete() {
        let (service, _, owner, other) = setup().await;
        let article = service.create(owner, request(true, &[])).await.unwrap();

        let update = UpdateArticleRequest {
            title: Some("Hijacked".to_string()),
            ..Default::default()
        };
        assert_matches!(
            service.update(article.id, other, update).await,
            Err(BackendError::Forbidden { .. })
        );
        assert_matches!(
            service.remove(article.id, other).await,
            Err(BackendError::Forbidden { .. })
        );

        service.remove(article.id, owner).await.unwrap();
        assert_matches!(
            service.remove(article.id, owner).await,
            Err(BackendError::NotFound { .. })
        );
    }

    #[tokio::test]
    async fn test_update_replaces_tags() {
        let (service, _, owner, _) = setup().await;
        let article = service.create(owner, request(true, &["a"])).await.unwrap();

        let updated = service
            .update(
                article.id,
                owner,
                UpdateArticleRequest {
                    tags: Some(vec!["c".to_string()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.tags.len(), 1);
        assert_eq!(updated.tags[0].name, "c");
        assert_eq!(updated.title, "Title");
        assert_eq!(service.list_tags().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_list_hides_private_articles_from_anonymous() {
        let (service, _, owner, other) = setup().await;
        service.create(owner, request(false, &[])).await.unwrap();
        service.create(owner, request(true, &[])).await.unwrap();

        let anonymous = service.find_list(None, ListArticlesParams::default()).await.unwrap();
        let as_other = service.find_list(Some(other), ListArticlesParams::default()).await.unwrap();
        let as_owner = service.find_list(Some(owner), ListArticlesParams::default()).await.unwrap();

        assert_eq!(anonymous.data.len(), 1);
        assert_eq!(as_other.data.len(), 2);
        assert_eq!(as_owner.data.len(), 2);
    }
}
