//! Admin dashboard aggregates.

use serde::Serialize;
use sqlx::FromRow;

use crate::models::post::Post;

/// Post count for one category.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

/// Everything the admin dashboard shows in one payload.
#[derive(Debug, Serialize)]
pub struct PortfolioStats {
    pub total_posts: i64,
    pub total_views: i64,
    pub total_likes: i64,
    pub total_messages: i64,
    pub unread_messages: i64,
    pub posts_by_category: Vec<CategoryCount>,
    pub recent_posts: Vec<Post>,
    pub top_posts: Vec<Post>,
}
