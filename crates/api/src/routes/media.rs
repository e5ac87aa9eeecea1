//! Route definitions for uploads and stored media.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::media;
use crate::state::AppState;

/// Routes merged at the API root.
///
/// ```text
/// POST /upload         -> upload (admin)
/// GET  /media/{*key}   -> serve_media
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload", post(media::upload))
        .route("/media/{*key}", get(media::serve_media))
}
