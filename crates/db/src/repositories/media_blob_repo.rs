//! Repository for the `media_blobs` table.

use sqlx::PgPool;

use crate::models::media_blob::{CreateMediaBlob, MediaBlob};

const COLUMNS: &str = "key, content_type, file_name, size_bytes, data, created_at";

/// Blob persistence for the database storage backend.
pub struct MediaBlobRepo;

impl MediaBlobRepo {
    /// Insert a blob. Keys are unique; a duplicate key is a database error.
    pub async fn insert(pool: &PgPool, input: &CreateMediaBlob<'_>) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO media_blobs (key, content_type, file_name, size_bytes, data)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(input.key)
        .bind(input.content_type)
        .bind(input.file_name)
        .bind(input.data.len() as i64)
        .bind(input.data)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Load a blob including its bytes.
    pub async fn find(pool: &PgPool, key: &str) -> Result<Option<MediaBlob>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media_blobs WHERE key = $1");
        sqlx::query_as::<_, MediaBlob>(&query)
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// Delete a blob. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, key: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM media_blobs WHERE key = $1")
            .bind(key)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
