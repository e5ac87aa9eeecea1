//! Standalone uploads and media retrieval.
//!
//! Stored media is streamed with HTTP range support so browsers can seek in
//! video posts without downloading the whole file.

use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::header::{self, HeaderMap};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use folio_core::storage::validate_media_key;
use folio_storage::MediaBody;
use serde::Serialize;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;

use crate::error::{AppError, AppResult};
use crate::form::MultipartForm;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Multipart field carrying the file for `POST /upload`.
const FILE_FIELD: &str = "file";

/// Keys are never reused, so stored bytes can be cached indefinitely.
const IMMUTABLE_CACHE: &str = "public, max-age=31536000, immutable";

/// Largest slice served for an open-ended `Range: bytes=N-` request (1 MiB).
const MAX_CHUNK_SIZE: u64 = 1024 * 1024;

/// Response for `POST /upload`.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
    pub key: String,
}

/// POST /api/upload
///
/// Stores a file without attaching it to a record.
pub async fn upload(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<UploadResponse>)> {
    let mut form = MultipartForm::read(&mut multipart, FILE_FIELD).await?;
    let upload = form
        .take_upload(state.config.max_upload_bytes)?
        .ok_or_else(|| AppError::BadRequest(format!("Missing required '{FILE_FIELD}' file")))?;

    let stored = state.media.upload(upload).await?;

    tracing::info!(
        key = %stored.key,
        size = stored.size_bytes,
        user_id = admin.user_id,
        "Standalone upload stored",
    );
    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            url: stored.locator,
            key: stored.key,
        }),
    ))
}

/// GET /api/media/{*key}
///
/// Serves the whole blob, or a single `Range: bytes=START-END` slice with
/// 206. Ranges past the end get 416.
pub async fn serve_media(
    State(state): State<AppState>,
    Path(key): Path<String>,
    headers: HeaderMap,
) -> AppResult<Response> {
    validate_media_key(&key)?;
    let media = state.media.store().open(&key).await?;
    let size = media.size;

    let range = match headers.get(header::RANGE) {
        Some(value) => {
            let value = value
                .to_str()
                .map_err(|_| AppError::BadRequest("Invalid Range header".into()))?;
            parse_range_header(value)
        }
        None => None,
    };

    let Some((start, end)) = range else {
        let body = body_slice(media.body, 0, size).await?;
        return Ok((
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, media.content_type),
                (header::CONTENT_LENGTH, size.to_string()),
                (header::ACCEPT_RANGES, "bytes".to_string()),
                (header::CACHE_CONTROL, IMMUTABLE_CACHE.to_string()),
            ],
            body,
        )
            .into_response());
    };

    if start >= size {
        return Ok(range_not_satisfiable(size));
    }
    let end = end
        .unwrap_or_else(|| start.saturating_add(MAX_CHUNK_SIZE - 1))
        .min(size - 1);
    if start > end {
        return Ok(range_not_satisfiable(size));
    }

    let length = end - start + 1;
    let body = body_slice(media.body, start, length).await?;

    Ok((
        StatusCode::PARTIAL_CONTENT,
        [
            (header::CONTENT_TYPE, media.content_type),
            (header::CONTENT_LENGTH, length.to_string()),
            (header::CONTENT_RANGE, format!("bytes {start}-{end}/{size}")),
            (header::ACCEPT_RANGES, "bytes".to_string()),
            (header::CACHE_CONTROL, IMMUTABLE_CACHE.to_string()),
        ],
        body,
    )
        .into_response())
}

fn range_not_satisfiable(size: u64) -> Response {
    (
        StatusCode::RANGE_NOT_SATISFIABLE,
        [(header::CONTENT_RANGE, format!("bytes */{size}"))],
    )
        .into_response()
}

/// Body for `length` bytes starting at `start`. Files are streamed.
///
/// The range must already be clamped to the blob size.
async fn body_slice(body: MediaBody, start: u64, length: u64) -> AppResult<Body> {
    match body {
        MediaBody::Bytes(data) => {
            if start == 0 && length == data.len() as u64 {
                return Ok(Body::from(data));
            }
            let from = start as usize;
            let to = from + length as usize;
            data.get(from..to)
                .map(|slice| Body::from(slice.to_vec()))
                .ok_or_else(|| AppError::InternalError("Range outside media bounds".into()))
        }
        MediaBody::File(mut file) => {
            if start > 0 {
                file.seek(std::io::SeekFrom::Start(start))
                    .await
                    .map_err(|e| AppError::InternalError(e.to_string()))?;
            }
            Ok(Body::from_stream(ReaderStream::new(file.take(length))))
        }
    }
}

/// Parse a `Range: bytes=START-END` header value into `(start, optional_end)`.
///
/// Suffix ranges (`bytes=-N`) and multi-range requests are not supported and
/// fall back to a full response.
fn parse_range_header(range: &str) -> Option<(u64, Option<u64>)> {
    let (start, end) = range.trim().strip_prefix("bytes=")?.split_once('-')?;
    let start = start.trim().parse::<u64>().ok()?;
    let end = match end.trim() {
        "" => None,
        end => Some(end.parse::<u64>().ok()?),
    };
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_header_forms() {
        assert_eq!(parse_range_header("bytes=0-99"), Some((0, Some(99))));
        assert_eq!(parse_range_header("bytes=100-"), Some((100, None)));
        assert_eq!(parse_range_header("bytes=-500"), None);
        assert_eq!(parse_range_header("bytes=0-1,5-9"), None);
        assert_eq!(parse_range_header("items=0-1"), None);
    }
}
