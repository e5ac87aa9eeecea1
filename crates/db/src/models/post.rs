//! Portfolio post entity model and DTOs.

use chrono::NaiveDate;
use folio_core::post::PostSort;
use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `posts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Post {
    pub id: DbId,
    pub title: String,
    pub post_type: String,
    pub category: String,
    pub story: String,
    pub location: String,
    pub shot_date: NaiveDate,
    pub shot_time: Option<String>,
    pub camera: Option<String>,
    pub lens: Option<String>,
    pub iso: Option<String>,
    pub aperture: Option<String>,
    pub shutter_speed: Option<String>,
    /// Where clients fetch the media bytes.
    pub media_url: Option<String>,
    /// Storage backend key used to delete the media. Owned by this row.
    pub media_key: Option<String>,
    pub tags: Vec<String>,
    pub views: i64,
    pub likes: i64,
    pub featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a post.
#[derive(Debug, Clone)]
pub struct CreatePost {
    pub title: String,
    pub post_type: String,
    pub category: String,
    pub story: String,
    pub location: String,
    pub shot_date: NaiveDate,
    pub shot_time: Option<String>,
    pub camera: Option<String>,
    pub lens: Option<String>,
    pub iso: Option<String>,
    pub aperture: Option<String>,
    pub shutter_speed: Option<String>,
    pub media_url: Option<String>,
    pub media_key: Option<String>,
    pub tags: Vec<String>,
    pub featured: bool,
}

/// DTO for patching a post. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdatePost {
    pub title: Option<String>,
    pub post_type: Option<String>,
    pub category: Option<String>,
    pub story: Option<String>,
    pub location: Option<String>,
    pub shot_date: Option<NaiveDate>,
    pub shot_time: Option<String>,
    pub camera: Option<String>,
    pub lens: Option<String>,
    pub iso: Option<String>,
    pub aperture: Option<String>,
    pub shutter_speed: Option<String>,
    pub media_url: Option<String>,
    pub media_key: Option<String>,
    pub tags: Option<Vec<String>>,
    pub featured: Option<bool>,
}

/// Resolved listing filter (already clamped and normalised).
#[derive(Debug, Clone)]
pub struct PostFilter {
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort: PostSort,
    pub limit: i64,
    pub offset: i64,
}

/// One page of posts plus paging metadata.
#[derive(Debug, Serialize)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub total_pages: i64,
    pub current_page: i64,
    pub total: i64,
}
