pub mod auth;
pub mod contact;
pub mod gear;
pub mod health;
pub mod media;
pub mod posts;
pub mod stats;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                 register (public)
/// /auth/login                    login (public)
/// /auth/verify                   verify token (requires auth)
///
/// /posts                         list (public), create (admin)
/// /posts/{id}                    get (public), update, delete (admin)
/// /posts/{id}/like               like (public)
///
/// /gear                          list (public), create (admin)
/// /gear/{id}                     update, delete (admin)
///
/// /contact                       submit (public), list (admin)
/// /contact/{id}                  update status (admin)
///
/// /stats                         dashboard aggregates (admin)
///
/// /upload                        standalone upload (admin)
/// /media/{*key}                  stored bytes (public)
///
/// /health                        service and database health
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/auth", auth::router())
        .nest("/posts", posts::router())
        .nest("/gear", gear::router())
        .nest("/contact", contact::router())
        .nest("/stats", stats::router())
        .merge(media::router())
}
