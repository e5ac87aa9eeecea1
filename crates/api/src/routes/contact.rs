//! Route definitions for the `/contact` resource.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::contact;
use crate::state::AppState;

/// Routes mounted at `/contact`.
///
/// ```text
/// POST /      -> submit_message
/// GET  /      -> list_messages (admin)
/// PUT  /{id}  -> update_status (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(contact::submit_message).get(contact::list_messages),
        )
        .route("/{id}", put(contact::update_status))
}
