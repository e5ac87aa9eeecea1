use folio_core::error::CoreError;

/// Failures raised by a [`MediaStore`](crate::MediaStore) backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Media not found: {0}")]
    NotFound(String),

    #[error("Invalid media key: {0}")]
    InvalidKey(String),

    #[error("Filesystem error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Object store error: {0}")]
    ObjectStore(String),

    #[error("Storage configuration error: {0}")]
    Config(String),
}

impl From<CoreError> for StorageError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => StorageError::InvalidKey(msg),
            other => StorageError::Config(other.to_string()),
        }
    }
}

/// Outcome of a media-bearing mutation that failed.
///
/// `Upload` means nothing was persisted. `Persist` means the upload succeeded
/// but the record write did not; the new blob has already been discarded.
#[derive(Debug, thiserror::Error)]
pub enum MediaError<E> {
    #[error("Media upload failed: {0}")]
    Upload(#[source] StorageError),

    #[error("{0}")]
    Persist(E),
}
