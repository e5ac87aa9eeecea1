use std::path::PathBuf;

use folio_core::storage::StorageBackend;

/// Default public prefix under which the API serves stored media.
pub const DEFAULT_PUBLIC_BASE_URL: &str = "/api/media";

/// Media storage configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Active backend (default: `local`).
    pub backend: StorageBackend,
    /// Prefix joined with a key to build the locator for local and database
    /// backends (default: `/api/media`).
    pub public_base_url: String,
    /// Root directory of the local backend (default: `./uploads`).
    pub local_root: PathBuf,
    /// Present when `backend` is `s3`.
    pub s3: Option<S3Config>,
}

/// Bucket settings for the S3 backend.
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible stores (MinIO, R2, ...).
    pub endpoint: Option<String>,
    pub force_path_style: bool,
    /// Prepended to every key, without a trailing slash.
    pub prefix: Option<String>,
    /// Public URL the bucket is served from. Falls back to the
    /// virtual-hosted bucket URL.
    pub public_base_url: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

impl StorageConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default      |
    /// |-------------------------|--------------|
    /// | `STORAGE_BACKEND`       | `local`      |
    /// | `MEDIA_PUBLIC_BASE_URL` | `/api/media` |
    /// | `STORAGE_LOCAL_ROOT`    | `./uploads`  |
    /// | `S3_BUCKET`             | required for `s3` |
    /// | `S3_REGION`             | `us-east-1`  |
    /// | `S3_PREFIX`             | none, checked by `S3MediaStore::connect` |
    ///
    /// # Panics
    ///
    /// Panics on an unknown backend name or when `s3` is selected without a
    /// bucket.
    pub fn from_env() -> Self {
        let backend_name = std::env::var("STORAGE_BACKEND").unwrap_or_else(|_| "local".into());
        let backend = StorageBackend::from_name(&backend_name)
            .expect("STORAGE_BACKEND must be one of: local, s3, database, memory");

        let public_base_url = std::env::var("MEDIA_PUBLIC_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_PUBLIC_BASE_URL.into());

        let local_root = std::env::var("STORAGE_LOCAL_ROOT")
            .unwrap_or_else(|_| "./uploads".into())
            .into();

        let s3 = (backend == StorageBackend::S3).then(|| S3Config {
            bucket: std::env::var("S3_BUCKET").expect("S3_BUCKET must be set when STORAGE_BACKEND=s3"),
            region: std::env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".into()),
            endpoint: non_empty_var("S3_ENDPOINT"),
            force_path_style: non_empty_var("S3_FORCE_PATH_STYLE")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            prefix: non_empty_var("S3_PREFIX").map(|p| p.trim_matches('/').to_string()),
            public_base_url: non_empty_var("S3_PUBLIC_BASE_URL"),
            access_key_id: non_empty_var("S3_ACCESS_KEY_ID"),
            secret_access_key: non_empty_var("S3_SECRET_ACCESS_KEY"),
        });

        Self {
            backend,
            public_base_url,
            local_root,
            s3,
        }
    }

    /// In-memory configuration for tests.
    pub fn memory() -> Self {
        Self {
            backend: StorageBackend::Memory,
            public_base_url: DEFAULT_PUBLIC_BASE_URL.into(),
            local_root: PathBuf::from("./uploads"),
            s3: None,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
