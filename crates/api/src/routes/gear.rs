//! Route definitions for the `/gear` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::gear;
use crate::state::AppState;

/// Routes mounted at `/gear`.
///
/// ```text
/// GET    /      -> list_gear
/// POST   /      -> create_gear (admin)
/// PUT    /{id}  -> update_gear (admin)
/// DELETE /{id}  -> delete_gear (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(gear::list_gear).post(gear::create_gear))
        .route("/{id}", put(gear::update_gear).delete(gear::delete_gear))
}
