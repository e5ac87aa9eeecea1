//! Process-local backend for tests and throwaway dev servers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use folio_core::storage::{join_locator, new_media_key, StorageBackend};
use tokio::sync::RwLock;

use crate::{MediaStore, MediaUpload, Result, RetrievedMedia, StorageError, StoredMedia};

/// Keeps blobs in a map. Failures can be switched on to exercise error paths.
pub struct InMemoryMediaStore {
    public_base_url: String,
    blobs: RwLock<HashMap<String, RetrievedMedia>>,
    fail_stores: AtomicBool,
    fail_deletes: AtomicBool,
}

impl InMemoryMediaStore {
    pub fn new(public_base_url: &str) -> Self {
        Self {
            public_base_url: public_base_url.to_string(),
            blobs: RwLock::new(HashMap::new()),
            fail_stores: AtomicBool::new(false),
            fail_deletes: AtomicBool::new(false),
        }
    }

    /// Make every subsequent `store` call fail.
    pub fn set_fail_stores(&self, fail: bool) {
        self.fail_stores.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `delete` call fail.
    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.blobs.read().await.contains_key(key)
    }

    /// Number of live blobs.
    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.blobs.read().await.is_empty()
    }
}

#[async_trait]
impl MediaStore for InMemoryMediaStore {
    fn backend(&self) -> StorageBackend {
        StorageBackend::Memory
    }

    async fn store(&self, upload: MediaUpload) -> Result<StoredMedia> {
        if self.fail_stores.load(Ordering::SeqCst) {
            return Err(StorageError::ObjectStore("injected store failure".into()));
        }

        let key = new_media_key(upload.kind, &upload.extension);
        let size_bytes = upload.data.len() as u64;
        self.blobs.write().await.insert(
            key.clone(),
            RetrievedMedia {
                data: upload.data,
                content_type: upload.content_type,
            },
        );

        Ok(StoredMedia {
            locator: join_locator(&self.public_base_url, &key),
            key,
            size_bytes,
        })
    }

    async fn retrieve(&self, key: &str) -> Result<RetrievedMedia> {
        self.blobs
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(StorageError::ObjectStore("injected delete failure".into()));
        }
        self.blobs.write().await.remove(key);
        Ok(())
    }
}
