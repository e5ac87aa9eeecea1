//! Repository for the `posts` table.

use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::post::{CreatePost, Post, PostFilter, UpdatePost};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, post_type, category, story, location, shot_date, shot_time, \
                       camera, lens, iso, aperture, shutter_speed, media_url, media_key, tags, \
                       views, likes, featured, created_at, updated_at";

/// Shared `WHERE` clause for listing and counting.
///
/// `$1` is the category (NULL = any), `$2` an ILIKE pattern (NULL = no search).
const LIST_FILTER: &str = "($1::text IS NULL OR category = $1)
     AND ($2::text IS NULL
          OR title ILIKE $2
          OR story ILIKE $2
          OR location ILIKE $2
          OR array_to_string(tags, ' ') ILIKE $2)";

/// Provides CRUD operations for posts.
pub struct PostRepo;

impl PostRepo {
    /// Insert a new post, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePost) -> Result<Post, sqlx::Error> {
        let query = format!(
            "INSERT INTO posts (title, post_type, category, story, location, shot_date, shot_time,
                                camera, lens, iso, aperture, shutter_speed, media_url, media_key,
                                tags, featured)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(&input.title)
            .bind(&input.post_type)
            .bind(&input.category)
            .bind(&input.story)
            .bind(&input.location)
            .bind(input.shot_date)
            .bind(&input.shot_time)
            .bind(&input.camera)
            .bind(&input.lens)
            .bind(&input.iso)
            .bind(&input.aperture)
            .bind(&input.shutter_speed)
            .bind(&input.media_url)
            .bind(&input.media_key)
            .bind(&input.tags)
            .bind(input.featured)
            .fetch_one(pool)
            .await
    }

    /// Find a post by ID without touching its counters.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Post>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM posts WHERE id = $1");
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one page of posts matching `filter`, plus the total match count.
    pub async fn list(pool: &PgPool, filter: &PostFilter) -> Result<(Vec<Post>, i64), sqlx::Error> {
        let pattern = filter.search.as_deref().map(like_pattern);

        let query = format!(
            "SELECT {COLUMNS} FROM posts
             WHERE {LIST_FILTER}
             ORDER BY {}
             LIMIT $3 OFFSET $4",
            filter.sort.order_by()
        );
        let posts = sqlx::query_as::<_, Post>(&query)
            .bind(&filter.category)
            .bind(&pattern)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM posts WHERE {LIST_FILTER}");
        let total: (i64,) = sqlx::query_as(&count_query)
            .bind(&filter.category)
            .bind(&pattern)
            .fetch_one(pool)
            .await?;

        Ok((posts, total.0))
    }

    /// Atomically bump the view counter and return the updated row.
    pub async fn record_view(pool: &PgPool, id: DbId) -> Result<Option<Post>, sqlx::Error> {
        let query = format!("UPDATE posts SET views = views + 1 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Atomically bump the like counter, returning the new count.
    pub async fn record_like(pool: &PgPool, id: DbId) -> Result<Option<i64>, sqlx::Error> {
        let likes: Option<(i64,)> =
            sqlx::query_as("UPDATE posts SET likes = likes + 1 WHERE id = $1 RETURNING likes")
                .bind(id)
                .fetch_optional(pool)
                .await?;
        Ok(likes.map(|row| row.0))
    }

    /// Update a post. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePost,
    ) -> Result<Option<Post>, sqlx::Error> {
        let query = format!(
            "UPDATE posts SET
                title = COALESCE($2, title),
                post_type = COALESCE($3, post_type),
                category = COALESCE($4, category),
                story = COALESCE($5, story),
                location = COALESCE($6, location),
                shot_date = COALESCE($7, shot_date),
                shot_time = COALESCE($8, shot_time),
                camera = COALESCE($9, camera),
                lens = COALESCE($10, lens),
                iso = COALESCE($11, iso),
                aperture = COALESCE($12, aperture),
                shutter_speed = COALESCE($13, shutter_speed),
                media_url = COALESCE($14, media_url),
                media_key = COALESCE($15, media_key),
                tags = COALESCE($16, tags),
                featured = COALESCE($17, featured),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.post_type)
            .bind(&input.category)
            .bind(&input.story)
            .bind(&input.location)
            .bind(input.shot_date)
            .bind(&input.shot_time)
            .bind(&input.camera)
            .bind(&input.lens)
            .bind(&input.iso)
            .bind(&input.aperture)
            .bind(&input.shutter_speed)
            .bind(&input.media_url)
            .bind(&input.media_key)
            .bind(&input.tags)
            .bind(input.featured)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a post. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Most recent posts, newest first.
    pub async fn recent(pool: &PgPool, limit: i64) -> Result<Vec<Post>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM posts ORDER BY created_at DESC, id DESC LIMIT $1");
        sqlx::query_as::<_, Post>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Most viewed posts.
    pub async fn most_viewed(pool: &PgPool, limit: i64) -> Result<Vec<Post>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM posts ORDER BY views DESC, id DESC LIMIT $1");
        sqlx::query_as::<_, Post>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Remove every post, returning one entry per deleted row with the
    /// media key it owned.
    pub async fn delete_all(pool: &PgPool) -> Result<Vec<Option<String>>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<String>>("DELETE FROM posts RETURNING media_key")
            .fetch_all(pool)
            .await
    }
}

/// Wrap free text in `%...%`, escaping LIKE metacharacters.
fn like_pattern(search: &str) -> String {
    let mut escaped = String::with_capacity(search.len() + 2);
    escaped.push('%');
    for c in search.trim().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn like_pattern_wraps_and_escapes() {
        assert_eq!(like_pattern("sunset"), "%sunset%");
        assert_eq!(like_pattern(" 100%_done "), "%100\\%\\_done%");
    }
}
