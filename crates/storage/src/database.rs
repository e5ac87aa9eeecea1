//! Database backend. Bytes live in the `media_blobs` table next to the records
//! that reference them, and the API serves them back by key.

use async_trait::async_trait;
use folio_core::storage::{join_locator, new_media_key, validate_media_key, StorageBackend};
use folio_db::models::media_blob::CreateMediaBlob;
use folio_db::repositories::MediaBlobRepo;
use folio_db::DbPool;

use crate::{MediaStore, MediaUpload, Result, RetrievedMedia, StorageError, StoredMedia};

pub struct DatabaseMediaStore {
    pool: DbPool,
    public_base_url: String,
}

impl DatabaseMediaStore {
    pub fn new(pool: DbPool, public_base_url: &str) -> Self {
        Self {
            pool,
            public_base_url: public_base_url.to_string(),
        }
    }
}

#[async_trait]
impl MediaStore for DatabaseMediaStore {
    fn backend(&self) -> StorageBackend {
        StorageBackend::Database
    }

    async fn store(&self, upload: MediaUpload) -> Result<StoredMedia> {
        let key = new_media_key(upload.kind, &upload.extension);
        MediaBlobRepo::insert(
            &self.pool,
            &CreateMediaBlob {
                key: &key,
                content_type: &upload.content_type,
                file_name: &upload.file_name,
                data: &upload.data,
            },
        )
        .await?;

        Ok(StoredMedia {
            locator: join_locator(&self.public_base_url, &key),
            size_bytes: upload.data.len() as u64,
            key,
        })
    }

    async fn retrieve(&self, key: &str) -> Result<RetrievedMedia> {
        validate_media_key(key)?;
        let blob = MediaBlobRepo::find(&self.pool, key)
            .await?
            .ok_or_else(|| StorageError::NotFound(key.to_string()))?;
        Ok(RetrievedMedia {
            data: blob.data,
            content_type: blob.content_type,
        })
    }

    async fn delete(&self, key: &str) -> Result<()> {
        validate_media_key(key)?;
        let removed = MediaBlobRepo::delete(&self.pool, key).await?;
        if !removed {
            tracing::debug!(key, "Media blob already absent");
        }
        Ok(())
    }
}
