//! Media storage for Folio.
//!
//! One [`MediaStore`] backend is active per deployment, selected by
//! [`StorageConfig::backend`]. Handlers never call a backend directly for
//! content records; they go through [`MediaLifecycle`], which fixes the
//! ordering upload -> persist -> best-effort delete of the superseded blob.

pub mod config;
pub mod database;
pub mod error;
pub mod lifecycle;
pub mod local;
pub mod memory;
pub mod s3;

use std::sync::Arc;

use async_trait::async_trait;
use folio_core::error::CoreError;
use folio_core::media::{
    classify_upload, content_type_for_extension, file_extension, validate_size, MediaKind,
};
use folio_core::storage::StorageBackend;
use folio_db::DbPool;

pub use config::{S3Config, StorageConfig};
pub use database::DatabaseMediaStore;
pub use error::{MediaError, StorageError};
pub use lifecycle::MediaLifecycle;
pub use local::LocalMediaStore;
pub use memory::InMemoryMediaStore;
pub use s3::S3MediaStore;

pub type Result<T> = std::result::Result<T, StorageError>;

// ---------------------------------------------------------------------------
// Values passed to and from backends
// ---------------------------------------------------------------------------

/// A validated file ready to hand to a backend.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub file_name: String,
    /// Lowercase extension without the dot.
    pub extension: String,
    pub content_type: String,
    pub kind: MediaKind,
    pub data: Vec<u8>,
}

impl MediaUpload {
    /// Validate name, declared content type and size.
    ///
    /// The declared type only has to agree with the extension. The stored
    /// type always comes from the extension allowlist, so a client cannot
    /// make the API serve an arbitrary `image/*` type.
    pub fn new(
        file_name: impl Into<String>,
        content_type: Option<String>,
        data: Vec<u8>,
        max_bytes: usize,
    ) -> std::result::Result<Self, CoreError> {
        let file_name = file_name.into();
        let kind = classify_upload(&file_name, content_type.as_deref())?;
        validate_size(data.len(), max_bytes)?;

        // classify_upload guarantees an extension exists.
        let extension = file_extension(&file_name).unwrap_or_default();
        let content_type = content_type_for_extension(&extension).to_string();

        Ok(Self {
            file_name,
            extension,
            content_type,
            kind,
            data,
        })
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Where an upload landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    /// URL clients use to fetch the bytes.
    pub locator: String,
    /// Backend handle needed to delete the bytes.
    pub key: String,
    pub size_bytes: u64,
}

/// Bytes read back from a backend.
#[derive(Debug, Clone)]
pub struct RetrievedMedia {
    pub data: Vec<u8>,
    pub content_type: String,
}

/// Where the bytes of an opened blob come from.
#[derive(Debug)]
pub enum MediaBody {
    /// Already in memory.
    Bytes(Vec<u8>),
    /// An open file, positioned at the start.
    File(tokio::fs::File),
}

/// A blob opened for serving, possibly in ranges.
#[derive(Debug)]
pub struct OpenedMedia {
    pub body: MediaBody,
    /// Total length in bytes.
    pub size: u64,
    pub content_type: String,
}

impl From<RetrievedMedia> for OpenedMedia {
    fn from(media: RetrievedMedia) -> Self {
        Self {
            size: media.data.len() as u64,
            content_type: media.content_type,
            body: MediaBody::Bytes(media.data),
        }
    }
}

// ---------------------------------------------------------------------------
// Backend trait
// ---------------------------------------------------------------------------

/// A place media bytes live.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Which backend this is.
    fn backend(&self) -> StorageBackend;

    /// Store an upload under a fresh key.
    async fn store(&self, upload: MediaUpload) -> Result<StoredMedia>;

    /// Read the bytes behind a key.
    async fn retrieve(&self, key: &str) -> Result<RetrievedMedia>;

    /// Open the bytes behind a key for streaming.
    ///
    /// Backends that hold whole blobs fall back to [`retrieve`](Self::retrieve).
    async fn open(&self, key: &str) -> Result<OpenedMedia> {
        Ok(self.retrieve(key).await?.into())
    }

    /// Make the bytes behind a key unreachable. Deleting an absent key succeeds.
    async fn delete(&self, key: &str) -> Result<()>;
}

/// Build the backend selected by `config`.
///
/// The database backend shares the application pool.
pub async fn connect(config: &StorageConfig, pool: &DbPool) -> Result<Arc<dyn MediaStore>> {
    let store: Arc<dyn MediaStore> = match config.backend {
        StorageBackend::Local => Arc::new(
            LocalMediaStore::create(config.local_root.clone(), &config.public_base_url).await?,
        ),
        StorageBackend::S3 => {
            let s3 = config.s3.as_ref().ok_or_else(|| {
                StorageError::Config("S3 backend selected without S3 settings".into())
            })?;
            Arc::new(S3MediaStore::connect(s3).await?)
        }
        StorageBackend::Database => {
            Arc::new(DatabaseMediaStore::new(pool.clone(), &config.public_base_url))
        }
        StorageBackend::Memory => Arc::new(InMemoryMediaStore::new(&config.public_base_url)),
    };

    tracing::info!(backend = store.backend().name(), "Media storage ready");
    Ok(store)
}
