//! Aggregate queries for the admin dashboard.

use folio_core::contact::STATUS_NEW;
use sqlx::PgPool;

use crate::models::stats::{CategoryCount, PortfolioStats};
use crate::repositories::PostRepo;

/// Number of posts shown in each dashboard list.
const DASHBOARD_LIST_SIZE: i64 = 5;

/// Read-only portfolio statistics.
pub struct StatsRepo;

impl StatsRepo {
    /// Collect every dashboard figure.
    ///
    /// `SUM` over `BIGINT` yields `NUMERIC` in Postgres, so totals are cast back.
    pub async fn portfolio(pool: &PgPool) -> Result<PortfolioStats, sqlx::Error> {
        let (total_posts, total_views, total_likes): (i64, i64, i64) = sqlx::query_as(
            "SELECT COUNT(*),
                    COALESCE(SUM(views), 0)::BIGINT,
                    COALESCE(SUM(likes), 0)::BIGINT
             FROM posts",
        )
        .fetch_one(pool)
        .await?;

        let (total_messages, unread_messages): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE status = $1) FROM contact_messages",
        )
        .bind(STATUS_NEW)
        .fetch_one(pool)
        .await?;

        let posts_by_category = sqlx::query_as::<_, CategoryCount>(
            "SELECT category, COUNT(*) AS count
             FROM posts
             GROUP BY category
             ORDER BY count DESC, category ASC",
        )
        .fetch_all(pool)
        .await?;

        let recent_posts = PostRepo::recent(pool, DASHBOARD_LIST_SIZE).await?;
        let top_posts = PostRepo::most_viewed(pool, DASHBOARD_LIST_SIZE).await?;

        Ok(PortfolioStats {
            total_posts,
            total_views,
            total_likes,
            total_messages,
            unread_messages,
            posts_by_category,
            recent_posts,
            top_posts,
        })
    }
}
