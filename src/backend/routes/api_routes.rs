/**
 * API Routes
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /auth/register` - User registration
 * - `POST /auth/login` - User login
 * - `GET /auth/me` - Get current user info (requires authentication)
 *
 * ## Articles
 * - `POST /articles` - Create (requires authentication)
 * - `GET /articles` - List, paginated and filterable by tag
 * - `GET /articles/{id}` - Fetch one
 * - `PATCH /articles/{id}` - Update (author only)
 * - `DELETE /articles/{id}` - Delete (author only)
 * - `GET /tags` - List tags
 *
 * ## Users
 * - `PATCH /user/{id}` - Update own record
 * - `DELETE /user/{id}` - Delete a user (ADMIN only)
 */

use axum::{
    handler::Handler,
    middleware::from_fn,
    routing::{get, patch, post},
    Router,
};

use crate::backend::articles::handlers::{
    create_article, delete_article, get_article, list_articles, list_tags, update_article,
};
use crate::backend::auth::{get_me, login, register};
use crate::backend::middleware::require_admin;
use crate::backend::server::state::AppState;
use crate::backend::users::handlers::{delete_user, update_user};

/// Configure API routes
///
/// Authentication is resolved by the router-wide middleware; handlers that
/// need a caller take the `AuthUser` extractor, and the user deletion route
/// additionally carries the ADMIN guard.
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Authentication endpoints
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/me", get(get_me))
        // Article endpoints
        .route("/articles", post(create_article).get(list_articles))
        .route(
            "/articles/{id}",
            get(get_article).patch(update_article).delete(delete_article),
        )
        .route("/tags", get(list_tags))
        // User endpoints
        .route(
            "/user/{id}",
            patch(update_user).delete(delete_user.layer(from_fn(require_admin))),
        )
}
