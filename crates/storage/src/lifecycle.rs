//! Ordering rules for records that own a media blob.
//!
//! Every mutation follows upload -> persist -> best-effort delete of whatever
//! blob the record no longer references. Upload failures abort the mutation.
//! Delete failures are logged and swallowed, so a record is never blocked by
//! its storage backend. A blob can be orphaned but a record never points at
//! a blob that was never written.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use crate::{MediaError, MediaStore, MediaUpload, Result, StoredMedia};

/// Coordinates record writes with the active [`MediaStore`].
#[derive(Clone)]
pub struct MediaLifecycle {
    store: Arc<dyn MediaStore>,
}

impl MediaLifecycle {
    pub fn new(store: Arc<dyn MediaStore>) -> Self {
        Self { store }
    }

    /// The underlying backend, for reads and standalone uploads.
    pub fn store(&self) -> &Arc<dyn MediaStore> {
        &self.store
    }

    /// Upload without tying the blob to a record.
    pub async fn upload(&self, upload: MediaUpload) -> Result<StoredMedia> {
        self.store.store(upload).await
    }

    /// Upload `upload`, then hand its locator and key to `persist`.
    ///
    /// If `persist` fails the new blob is deleted once, best-effort, and the
    /// persistence error is returned.
    pub async fn create_with_media<T, E, F, Fut>(
        &self,
        upload: MediaUpload,
        persist: F,
    ) -> std::result::Result<T, MediaError<E>>
    where
        E: Display,
        F: FnOnce(StoredMedia) -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
    {
        let file_name = upload.file_name.clone();
        let stored = self
            .store
            .store(upload)
            .await
            .map_err(MediaError::Upload)?;
        let key = stored.key.clone();

        tracing::debug!(key = %key, file_name = %file_name, size = stored.size_bytes, "Media uploaded");

        match persist(stored).await {
            Ok(record) => Ok(record),
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "Record write failed after upload");
                self.discard(&key, "record write failed").await;
                Err(MediaError::Persist(err))
            }
        }
    }

    /// Like [`create_with_media`](Self::create_with_media), then delete
    /// `previous_key` best-effort once the record points at the new blob.
    ///
    /// If persisting fails the previous blob is left alone, since the record
    /// still references it.
    pub async fn replace_media<T, E, F, Fut>(
        &self,
        previous_key: Option<String>,
        upload: MediaUpload,
        persist: F,
    ) -> std::result::Result<T, MediaError<E>>
    where
        E: Display,
        F: FnOnce(StoredMedia) -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
    {
        let record = self.create_with_media(upload, persist).await?;

        if let Some(previous) = previous_key {
            self.discard(&previous, "superseded").await;
        }
        Ok(record)
    }

    /// Run `remove` and, if it reports a row was deleted, delete `key`
    /// best-effort.
    ///
    /// Returns what `remove` returned. When the record was already gone the
    /// blob is left for whoever deleted it.
    pub async fn delete_record<E, F, Fut>(
        &self,
        key: Option<String>,
        remove: F,
    ) -> std::result::Result<bool, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<bool, E>>,
    {
        let removed = remove().await?;

        if removed {
            if let Some(key) = key {
                self.discard(&key, "record deleted").await;
            }
        }
        Ok(removed)
    }

    /// Best-effort delete of a key a record stopped referencing without a new
    /// upload, e.g. when its locator was pointed at an external URL.
    ///
    /// Call only after the record write has succeeded.
    pub async fn release(&self, key: Option<String>) {
        if let Some(key) = key {
            self.discard(&key, "detached").await;
        }
    }

    /// Single-attempt delete. Failure leaves an orphan and is only logged.
    async fn discard(&self, key: &str, reason: &'static str) {
        match self.store.delete(key).await {
            Ok(()) => tracing::debug!(key, reason, "Media deleted"),
            Err(err) => tracing::warn!(
                key,
                reason,
                error = %err,
                "Best-effort media delete failed, blob may be orphaned",
            ),
        }
    }
}
