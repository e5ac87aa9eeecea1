//! Storage backend identifiers and media key rules.
//!
//! Exactly one backend is active per deployment. Keys are generated here so
//! every backend lays out its objects the same way.

use crate::error::CoreError;
use crate::media::MediaKind;

// ---------------------------------------------------------------------------
// Backend type
// ---------------------------------------------------------------------------

/// The media storage strategy selected at deployment time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Local,
    S3,
    Database,
    /// Process-local map. Only used by tests and throwaway dev servers.
    Memory,
}

impl StorageBackend {
    /// Parse from the `STORAGE_BACKEND` configuration value.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "local" | "fs" => Ok(Self::Local),
            "s3" => Ok(Self::S3),
            "database" | "db" => Ok(Self::Database),
            "memory" => Ok(Self::Memory),
            other => Err(CoreError::Validation(format!(
                "Unknown storage backend '{other}'. Must be one of: local, s3, database, memory"
            ))),
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Local => "Local Filesystem",
            Self::S3 => "Amazon S3 / Compatible",
            Self::Database => "Database Blob Store",
            Self::Memory => "In-Memory",
        }
    }

    /// Configuration value.
    pub fn name(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::S3 => "s3",
            Self::Database => "database",
            Self::Memory => "memory",
        }
    }
}

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// Maximum accepted key length.
pub const MAX_KEY_LENGTH: usize = 512;

/// Build a fresh media key: `<images|videos>/<shard>/<uuid>.<ext>`.
///
/// The two-character shard keeps local directories small.
pub fn new_media_key(kind: MediaKind, ext: &str) -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("{}/{}/{}.{}", kind.folder(), &id[..2], id, ext)
}

/// Reject keys that could escape a storage root or break URL building.
pub fn validate_media_key(key: &str) -> Result<(), CoreError> {
    if key.is_empty() || key.len() > MAX_KEY_LENGTH {
        return Err(CoreError::Validation("Media key is empty or too long".into()));
    }
    if key.starts_with('/') || key.ends_with('/') {
        return Err(CoreError::Validation(format!("Media key '{key}' must be relative")));
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '/');
    if !key.chars().all(allowed) {
        return Err(CoreError::Validation(format!(
            "Media key '{key}' contains invalid characters"
        )));
    }
    if key.split('/').any(|segment| segment.is_empty() || segment == "." || segment == "..") {
        return Err(CoreError::Validation(format!(
            "Media key '{key}' contains an invalid path segment"
        )));
    }
    Ok(())
}

/// Join a public base URL and a key with exactly one slash between them.
pub fn join_locator(base_url: &str, key: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), key.trim_start_matches('/'))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_from_name() {
        assert_eq!(StorageBackend::from_name("local").unwrap(), StorageBackend::Local);
        assert_eq!(StorageBackend::from_name("S3").unwrap(), StorageBackend::S3);
        assert_eq!(StorageBackend::from_name("db").unwrap(), StorageBackend::Database);
        assert_eq!(StorageBackend::from_name("database").unwrap(), StorageBackend::Database);
        assert!(StorageBackend::from_name("cloudinary").is_err());
    }

    #[test]
    fn backend_names_round_trip() {
        for backend in [
            StorageBackend::Local,
            StorageBackend::S3,
            StorageBackend::Database,
            StorageBackend::Memory,
        ] {
            assert_eq!(StorageBackend::from_name(backend.name()).unwrap(), backend);
        }
    }

    #[test]
    fn generated_keys_are_valid() {
        let key = new_media_key(MediaKind::Image, "jpg");
        assert!(key.starts_with("images/"));
        assert!(key.ends_with(".jpg"));
        assert!(validate_media_key(&key).is_ok());

        let other = new_media_key(MediaKind::Video, "mp4");
        assert!(other.starts_with("videos/"));
        assert_ne!(key, other);
    }

    #[test]
    fn traversal_is_rejected() {
        assert!(validate_media_key("../etc/passwd").is_err());
        assert!(validate_media_key("images/../../secret").is_err());
        assert!(validate_media_key("/absolute/path.jpg").is_err());
        assert!(validate_media_key("images//double.jpg").is_err());
        assert!(validate_media_key("images/with space.jpg").is_err());
        assert!(validate_media_key("").is_err());
    }

    #[test]
    fn locator_join() {
        assert_eq!(join_locator("/api/media/", "images/ab/x.jpg"), "/api/media/images/ab/x.jpg");
        assert_eq!(
            join_locator("https://cdn.example.com", "x.jpg"),
            "https://cdn.example.com/x.jpg"
        );
    }
}
