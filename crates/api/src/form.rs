//! Multipart form reading for media-bearing endpoints.
//!
//! Text fields are collected by name. A single named file field becomes a
//! validated [`MediaUpload`]. Browsers send an empty, nameless part when no
//! file was chosen; that counts as no file.

use std::collections::HashMap;

use axum::extract::Multipart;
use chrono::NaiveDate;
use folio_core::error::CoreError;
use folio_core::post::{parse_date, parse_flag};
use folio_storage::MediaUpload;

use crate::error::{AppError, AppResult};

/// A file part as received, before validation.
#[derive(Debug)]
struct FilePart {
    file_name: String,
    content_type: Option<String>,
    data: Vec<u8>,
}

/// Collected multipart fields.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    file: Option<FilePart>,
}

impl MultipartForm {
    /// Drain `multipart`, keeping `file_field` as the file and everything
    /// else as text. Unknown file fields are ignored.
    pub async fn read(multipart: &mut Multipart, file_field: &str) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let name = field.name().unwrap_or("").to_string();

            if name == file_field {
                let file_name = field.file_name().unwrap_or("").to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if file_name.is_empty() && data.is_empty() {
                    continue;
                }
                form.file = Some(FilePart {
                    file_name,
                    content_type,
                    data: data.to_vec(),
                });
            } else if field.file_name().is_none() && !name.is_empty() {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.fields.insert(name, text);
            }
        }

        Ok(form)
    }

    /// First non-blank value among `names` (a field and its aliases), trimmed.
    pub fn text(&self, names: &[&str]) -> Option<String> {
        names
            .iter()
            .filter_map(|name| self.fields.get(*name))
            .map(|v| v.trim())
            .find(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Like [`text`](Self::text) but missing values are a validation error
    /// naming the first alias.
    pub fn required(&self, names: &[&str]) -> AppResult<String> {
        self.text(names).ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "Field '{}' is required",
                names.first().copied().unwrap_or_default()
            )))
        })
    }

    /// Optional date field.
    pub fn date(&self, names: &[&str]) -> AppResult<Option<NaiveDate>> {
        self.text(names)
            .map(|raw| parse_date(&raw))
            .transpose()
            .map_err(AppError::from)
    }

    /// Optional boolean field.
    pub fn flag(&self, names: &[&str]) -> AppResult<Option<bool>> {
        self.text(names)
            .map(|raw| parse_flag(&raw))
            .transpose()
            .map_err(AppError::from)
    }

    /// Validate and take the file, if one was sent.
    pub fn take_upload(&mut self, max_bytes: usize) -> AppResult<Option<MediaUpload>> {
        let Some(file) = self.file.take() else {
            return Ok(None);
        };
        let upload = MediaUpload::new(file.file_name, file.content_type, file.data, max_bytes)?;
        Ok(Some(upload))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn form(fields: &[(&str, &str)]) -> MultipartForm {
        MultipartForm {
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            file: None,
        }
    }

    #[test]
    fn aliases_are_tried_in_order() {
        let f = form(&[("shutterSpeed", "1/250"), ("shutter_speed", "  ")]);
        assert_eq!(f.text(&["shutter_speed", "shutterSpeed"]).as_deref(), Some("1/250"));
        assert_eq!(f.text(&["aperture"]), None);
    }

    #[test]
    fn required_fields() {
        let f = form(&[("title", " Dawn ")]);
        assert_eq!(f.required(&["title"]).unwrap(), "Dawn");
        assert_matches!(
            f.required(&["story"]),
            Err(AppError::Core(CoreError::Validation(msg))) if msg.contains("story")
        );
    }

    #[test]
    fn dates_and_flags() {
        let f = form(&[("date", "2024-06-21"), ("featured", "true"), ("inUse", "nope")]);
        assert_eq!(
            f.date(&["shot_date", "date"]).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 21)
        );
        assert_eq!(f.flag(&["featured"]).unwrap(), Some(true));
        assert!(f.flag(&["in_use", "inUse"]).is_err());
        assert_eq!(f.flag(&["missing"]).unwrap(), None);
    }

    #[test]
    fn upload_is_validated() {
        let mut f = form(&[]);
        assert!(f.take_upload(1024).unwrap().is_none());

        f.file = Some(FilePart {
            file_name: "notes.txt".into(),
            content_type: Some("text/plain".into()),
            data: vec![1, 2, 3],
        });
        assert!(f.take_upload(1024).is_err());

        f.file = Some(FilePart {
            file_name: "dawn.jpg".into(),
            content_type: Some("image/jpeg".into()),
            data: vec![1; 10],
        });
        let upload = f.take_upload(1024).unwrap().unwrap();
        assert_eq!(upload.size(), 10);
    }
}
