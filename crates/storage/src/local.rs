//! Filesystem backend. Keys are relative paths under a root directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use folio_core::media::{content_type_for_extension, file_extension};
use folio_core::storage::{join_locator, new_media_key, validate_media_key, StorageBackend};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::{
    MediaBody, MediaStore, MediaUpload, OpenedMedia, Result, RetrievedMedia, StorageError,
    StoredMedia,
};

/// Stores media as plain files under `root`.
pub struct LocalMediaStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalMediaStore {
    /// Create the store, making sure the root directory exists.
    pub async fn create(root: PathBuf, public_base_url: &str) -> Result<Self> {
        fs::create_dir_all(&root).await?;
        tracing::debug!(root = %root.display(), "Local media root ready");
        Ok(Self {
            root,
            public_base_url: public_base_url.to_string(),
        })
    }

    /// Resolve a key to a path inside the root. Rejects traversal.
    fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_media_key(key)?;
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    fn backend(&self) -> StorageBackend {
        StorageBackend::Local
    }

    async fn store(&self, upload: MediaUpload) -> Result<StoredMedia> {
        let key = new_media_key(upload.kind, &upload.extension);
        let path = self.path_for(&key)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        write_file(&path, &upload.data).await?;

        Ok(StoredMedia {
            locator: join_locator(&self.public_base_url, &key),
            size_bytes: upload.data.len() as u64,
            key,
        })
    }

    async fn retrieve(&self, key: &str) -> Result<RetrievedMedia> {
        let path = self.path_for(key)?;
        let data = match fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        let ext = file_extension(key).unwrap_or_default();
        Ok(RetrievedMedia {
            data,
            content_type: content_type_for_extension(&ext).to_string(),
        })
    }

    async fn open(&self, key: &str) -> Result<OpenedMedia> {
        let path = self.path_for(key)?;
        let file = match fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        let size = file.metadata().await?.len();

        let ext = file_extension(key).unwrap_or_default();
        Ok(OpenedMedia {
            body: MediaBody::File(file),
            size,
            content_type: content_type_for_extension(&ext).to_string(),
        })
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Write `data` to a new file at `path`. On failure nothing is left behind.
async fn write_file(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let result = async {
        let mut file = fs::File::create(path).await?;
        file.write_all(data).await?;
        file.sync_all().await
    }
    .await;

    if result.is_err() {
        remove_partial(path).await;
    }
    result
}

async fn remove_partial(path: &Path) {
    match fs::remove_file(path).await {
        Ok(()) => tracing::debug!(path = %path.display(), "Removed partial upload"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(
            path = %path.display(),
            error = %e,
            "Failed to remove partial upload",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn partial_file_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("half.jpg");
        std::fs::write(&path, [1, 2, 3]).unwrap();

        remove_partial(&path).await;
        assert!(!path.exists());

        // Already gone is fine.
        remove_partial(&path).await;
    }

    #[tokio::test]
    async fn failed_write_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-parent").join("x.jpg");

        assert!(write_file(&path, &[7; 4]).await.is_err());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn write_file_writes_everything() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("full.jpg");

        write_file(&path, &[7; 4]).await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), vec![7; 4]);
    }
}
