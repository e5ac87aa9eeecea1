//! Bulk content operations used by the seed tool.

use folio_db::repositories::{ContactRepo, GearRepo, PostRepo};
use folio_db::DbPool;
use folio_storage::MediaLifecycle;

/// Row counts removed by [`reset_content`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetSummary {
    pub posts: usize,
    pub gear: usize,
    pub messages: u64,
    /// Media keys handed to the backend for deletion.
    pub media_released: usize,
}

/// Delete all posts, gear and contact messages, then release every media
/// blob the deleted posts and gear owned.
///
/// Blob deletes run after the rows are gone and are best-effort, the same
/// as a single-record delete.
pub async fn reset_content(
    pool: &DbPool,
    media: &MediaLifecycle,
) -> Result<ResetSummary, sqlx::Error> {
    let post_keys = PostRepo::delete_all(pool).await?;
    let gear_keys = GearRepo::delete_all(pool).await?;
    let messages = ContactRepo::delete_all(pool).await?;

    let posts = post_keys.len();
    let gear = gear_keys.len();
    let keys: Vec<String> = post_keys.into_iter().chain(gear_keys).flatten().collect();
    let media_released = keys.len();

    for key in keys {
        media.release(Some(key)).await;
    }

    tracing::info!(posts, gear, messages, media_released, "Existing content removed");
    Ok(ResetSummary {
        posts,
        gear,
        messages,
        media_released,
    })
}
