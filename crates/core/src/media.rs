//! Upload validation rules for portfolio media.
//!
//! Decides whether an uploaded file is an image or a video from its file name
//! and declared content type, and enforces the size limit. Storage backends
//! never see a file that has not passed through [`classify_upload`].

use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Accepted still-image extensions (lowercase, without the dot).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Accepted video extensions (lowercase, without the dot).
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "wmv", "flv", "webm"];

/// Default upload ceiling (100 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Content type clients send when they do not know better.
const OCTET_STREAM: &str = "application/octet-stream";

// ---------------------------------------------------------------------------
// Media kind
// ---------------------------------------------------------------------------

/// Broad category of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Lowercase name, also the MIME top-level type.
    pub fn name(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }

    /// Directory segment used when building storage keys.
    pub fn folder(self) -> &'static str {
        match self {
            Self::Image => "images",
            Self::Video => "videos",
        }
    }

    /// Classify a lowercase extension, or `None` if it is not accepted.
    pub fn from_extension(ext: &str) -> Option<Self> {
        if IMAGE_EXTENSIONS.contains(&ext) {
            Some(Self::Image)
        } else if VIDEO_EXTENSIONS.contains(&ext) {
            Some(Self::Video)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Extract the lowercase extension from a file name (`"A.JPG"` -> `"jpg"`).
pub fn file_extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Validate an upload's name and declared content type.
///
/// The extension must be one of the accepted image or video extensions. When
/// a content type is declared (and is not `application/octet-stream`) it must
/// be `image/*` or `video/*` and agree with the extension.
pub fn classify_upload(file_name: &str, content_type: Option<&str>) -> Result<MediaKind, CoreError> {
    let ext = file_extension(file_name).ok_or_else(|| {
        CoreError::Validation(format!("File '{file_name}' has no extension"))
    })?;

    let kind = MediaKind::from_extension(&ext).ok_or_else(|| {
        CoreError::Validation(format!(
            "Unsupported file type '.{ext}'. Only images ({}) and videos ({}) are allowed",
            IMAGE_EXTENSIONS.join(", "),
            VIDEO_EXTENSIONS.join(", ")
        ))
    })?;

    if let Some(declared) = content_type {
        let declared = declared.trim().to_ascii_lowercase();
        if !declared.is_empty() && declared != OCTET_STREAM {
            let top_level = declared.split('/').next().unwrap_or_default();
            if top_level != kind.name() {
                return Err(CoreError::Validation(format!(
                    "Content type '{declared}' does not match file extension '.{ext}'"
                )));
            }
        }
    }

    Ok(kind)
}

/// Reject empty files and files over `max_bytes`.
pub fn validate_size(size: usize, max_bytes: usize) -> Result<(), CoreError> {
    if size == 0 {
        return Err(CoreError::Validation("Uploaded file is empty".into()));
    }
    if size > max_bytes {
        return Err(CoreError::Validation(format!(
            "Uploaded file is {size} bytes, the limit is {max_bytes} bytes"
        )));
    }
    Ok(())
}

/// Best-guess content type for an accepted extension.
pub fn content_type_for_extension(ext: &str) -> &'static str {
    match ext {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "wmv" => "video/x-ms-wmv",
        "flv" => "video/x-flv",
        "webm" => "video/webm",
        _ => OCTET_STREAM,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(file_extension("Sunset.JPG").as_deref(), Some("jpg"));
        assert_eq!(file_extension("clip.final.webm").as_deref(), Some("webm"));
    }

    #[test]
    fn extension_missing() {
        assert!(file_extension("README").is_none());
        assert!(file_extension(".hidden").is_none());
        assert!(file_extension("trailing.").is_none());
    }

    #[test]
    fn classify_image_and_video() {
        assert_eq!(classify_upload("a.png", Some("image/png")).unwrap(), MediaKind::Image);
        assert_eq!(classify_upload("b.mov", Some("video/quicktime")).unwrap(), MediaKind::Video);
    }

    #[test]
    fn classify_without_content_type_uses_extension() {
        assert_eq!(classify_upload("a.webp", None).unwrap(), MediaKind::Image);
        assert_eq!(
            classify_upload("a.mp4", Some("application/octet-stream")).unwrap(),
            MediaKind::Video
        );
    }

    #[test]
    fn classify_rejects_unknown_extension() {
        assert!(classify_upload("notes.txt", Some("text/plain")).is_err());
        assert!(classify_upload("archive.zip", None).is_err());
    }

    #[test]
    fn classify_rejects_mismatched_content_type() {
        assert!(classify_upload("photo.jpg", Some("video/mp4")).is_err());
        assert!(classify_upload("photo.jpg", Some("application/pdf")).is_err());
    }

    #[test]
    fn size_limits() {
        assert!(validate_size(0, 10).is_err());
        assert!(validate_size(10, 10).is_ok());
        assert!(validate_size(11, 10).is_err());
    }

    #[test]
    fn content_types() {
        assert_eq!(content_type_for_extension("jpeg"), "image/jpeg");
        assert_eq!(content_type_for_extension("mov"), "video/quicktime");
        assert_eq!(content_type_for_extension("exe"), "application/octet-stream");
    }
}
