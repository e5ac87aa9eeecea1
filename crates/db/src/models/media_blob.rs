//! Rows of the `media_blobs` table used by the database storage backend.

use folio_core::types::Timestamp;
use sqlx::FromRow;

/// A stored blob including its bytes.
#[derive(Debug, Clone, FromRow)]
pub struct MediaBlob {
    pub key: String,
    pub content_type: String,
    pub file_name: String,
    pub size_bytes: i64,
    pub data: Vec<u8>,
    pub created_at: Timestamp,
}

/// DTO for inserting a blob.
#[derive(Debug)]
pub struct CreateMediaBlob<'a> {
    pub key: &'a str,
    pub content_type: &'a str,
    pub file_name: &'a str,
    pub data: &'a [u8],
}
