/**
 * Article Handlers
 *
 * HTTP handlers for `/articles` and `/tags`. Reads accept anonymous callers;
 * writes require a token.
 *
 * # Endpoints
 *
 * - `POST   /articles`      - create (201)
 * - `GET    /articles`      - list with `page`, `limit` and `tags` filters
 * - `GET    /articles/{id}` - fetch one
 * - `PATCH  /articles/{id}` - partial update by the author
 * - `DELETE /articles/{id}` - delete by the author (204)
 * - `GET    /tags`          - every known tag
 */

use axum::{extract::State, http::StatusCode};

use crate::backend::articles::service::ArticleService;
use crate::backend::articles::types::{CreateArticleRequest, ListArticlesParams, UpdateArticleRequest};
use crate::backend::error::BackendError;
use crate::backend::extract::{ApiJson, ApiPath, ApiQuery};
use crate::backend::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::shared::models::{Article, Page, Tag};

pub async fn create_article(
    State(articles): State<ArticleService>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<CreateArticleRequest>,
) -> Result<(StatusCode, ApiJson<Article>), BackendError> {
    let article = articles.create(user.user_id, request).await?;
    Ok((StatusCode::CREATED, ApiJson(article)))
}

pub async fn list_articles(
    State(articles): State<ArticleService>,
    caller: MaybeAuthUser,
    ApiQuery(params): ApiQuery<ListArticlesParams>,
) -> Result<ApiJson<Page<Article>>, BackendError> {
    Ok(ApiJson(articles.find_list(caller.user_id(), params).await?))
}

pub async fn get_article(
    State(articles): State<ArticleService>,
    caller: MaybeAuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<ApiJson<Article>, BackendError> {
    Ok(ApiJson(articles.find_one(id, caller.user_id()).await?))
}

pub async fn update_article(
    State(articles): State<ArticleService>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateArticleRequest>,
) -> Result<ApiJson<Article>, BackendError> {
    Ok(ApiJson(articles.update(id, user.user_id, request).await?))
}

pub async fn delete_article(
    State(articles): State<ArticleService>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, BackendError> {
    articles.remove(id, user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_tags(
    State(articles): State<ArticleService>,
) -> Result<ApiJson<Vec<Tag>>, BackendError> {
    Ok(ApiJson(articles.list_tags().await?))
}
