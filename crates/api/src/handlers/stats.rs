//! Admin dashboard statistics.

use axum::extract::State;
use axum::Json;
use folio_db::models::stats::PortfolioStats;
use folio_db::repositories::StatsRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/stats
pub async fn portfolio_stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<PortfolioStats>> {
    let stats = StatsRepo::portfolio(&state.pool).await?;
    Ok(Json(stats))
}
