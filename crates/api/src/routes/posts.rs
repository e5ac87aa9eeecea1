//! Route definitions for the `/posts` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::posts;
use crate::state::AppState;

/// Routes mounted at `/posts`.
///
/// ```text
/// GET    /           -> list_posts
/// POST   /           -> create_post (admin)
/// GET    /{id}       -> get_post
/// PUT    /{id}       -> update_post (admin)
/// DELETE /{id}       -> delete_post (admin)
/// POST   /{id}/like  -> like_post
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(posts::list_posts).post(posts::create_post))
        .route(
            "/{id}",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route("/{id}/like", post(posts::like_post))
}
