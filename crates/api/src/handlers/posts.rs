//! Handlers for the `/posts` resource.
//!
//! Create, replace and delete go through [`MediaLifecycle`] so a post never
//! references media that was not stored, and superseded media is cleaned up
//! best-effort.
//!
//! [`MediaLifecycle`]: folio_storage::MediaLifecycle

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::media::MediaKind;
use folio_core::pagination::{
    clamp_limit, clamp_page, page_offset, total_pages, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
use folio_core::post::{
    category_filter, parse_tags, post_type_for, validate_post_type, validate_title, PostSort,
};
use folio_core::types::DbId;
use folio_db::models::post::{CreatePost, Post, PostFilter, PostPage, UpdatePost};
use folio_db::repositories::PostRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::form::MultipartForm;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PostListParams;
use crate::state::AppState;

/// Multipart field carrying the photo or video.
const MEDIA_FIELD: &str = "media";

// Form field names, followed by the names older clients send.
const TITLE: &[&str] = &["title"];
const POST_TYPE: &[&str] = &["post_type", "type"];
const CATEGORY: &[&str] = &["category"];
const STORY: &[&str] = &["story"];
const LOCATION: &[&str] = &["location"];
const SHOT_DATE: &[&str] = &["shot_date", "date"];
const SHOT_TIME: &[&str] = &["shot_time", "time"];
const CAMERA: &[&str] = &["camera"];
const LENS: &[&str] = &["lens"];
const ISO: &[&str] = &["iso"];
const APERTURE: &[&str] = &["aperture"];
const SHUTTER_SPEED: &[&str] = &["shutter_speed", "shutterSpeed"];
const TAGS: &[&str] = &["tags"];
const FEATURED: &[&str] = &["featured"];

/// Response for `POST /posts/{id}/like`.
#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub likes: i64,
}

/// GET /api/posts
pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<PostListParams>,
) -> AppResult<Json<PostPage>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
    let page = clamp_page(params.page);

    let filter = PostFilter {
        category: category_filter(params.category.as_deref()),
        search: params
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
        sort: PostSort::parse(params.sort.as_deref()),
        limit,
        offset: page_offset(page, limit),
    };

    let (posts, total) = PostRepo::list(&state.pool, &filter).await?;

    Ok(Json(PostPage {
        posts,
        total_pages: total_pages(total, limit),
        current_page: page,
        total,
    }))
}

/// GET /api/posts/{id}
///
/// Counts as a view.
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Post>> {
    let post = PostRepo::record_view(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(post))
}

/// POST /api/posts
///
/// Multipart form with a required `media` file. The file is stored first;
/// the post is only written once the upload succeeded.
pub async fn create_post(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<Post>)> {
    let mut form = MultipartForm::read(&mut multipart, MEDIA_FIELD).await?;
    let upload = form
        .take_upload(state.config.max_upload_bytes)?
        .ok_or_else(|| AppError::BadRequest(format!("Missing required '{MEDIA_FIELD}' file")))?;
    let input = new_post(&form, upload.kind)?;

    let pool = state.pool.clone();
    let post = state
        .media
        .create_with_media(upload, |stored| async move {
            let input = CreatePost {
                media_url: Some(stored.locator),
                media_key: Some(stored.key),
                ..input
            };
            PostRepo::create(&pool, &input).await.map_err(AppError::from)
        })
        .await?;

    tracing::info!(post_id = post.id, user_id = admin.user_id, "Post created");
    Ok((StatusCode::CREATED, Json(post)))
}

/// PUT /api/posts/{id}
///
/// Multipart form. With a `media` file the stored media is replaced and the
/// old file deleted best-effort; without one only the sent fields change.
pub async fn update_post(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<Post>> {
    let existing = PostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;

    let mut form = MultipartForm::read(&mut multipart, MEDIA_FIELD).await?;
    let upload = form.take_upload(state.config.max_upload_bytes)?;
    let mut changes = post_changes(&form)?;

    let post = match upload {
        Some(upload) => {
            if changes.post_type.is_none() {
                changes.post_type = Some(post_type_for(upload.kind).to_string());
            }
            let pool = state.pool.clone();
            state
                .media
                .replace_media(existing.media_key, upload, |stored| async move {
                    let changes = UpdatePost {
                        media_url: Some(stored.locator),
                        media_key: Some(stored.key),
                        ..changes
                    };
                    PostRepo::update(&pool, id, &changes)
                        .await
                        .map_err(AppError::from)
                        .and_then(|post| post.ok_or(not_found(id)))
                })
                .await?
        }
        None => PostRepo::update(&state.pool, id, &changes)
            .await?
            .ok_or(not_found(id))?,
    };

    tracing::info!(post_id = id, user_id = admin.user_id, "Post updated");
    Ok(Json(post))
}

/// DELETE /api/posts/{id}
///
/// Removes the post, then its media best-effort.
pub async fn delete_post(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = PostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;

    let removed = state
        .media
        .delete_record(existing.media_key, || PostRepo::delete(&state.pool, id))
        .await?;
    if !removed {
        return Err(not_found(id));
    }

    tracing::info!(post_id = id, user_id = admin.user_id, "Post deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/posts/{id}/like
pub async fn like_post(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<LikeResponse>> {
    let likes = PostRepo::record_like(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(LikeResponse { likes }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Post", id })
}

/// Build an insert from form fields. Media columns are filled in after upload.
fn new_post(form: &MultipartForm, kind: MediaKind) -> AppResult<CreatePost> {
    let title = form.required(TITLE)?;
    validate_title(&title)?;

    let post_type = match form.text(POST_TYPE) {
        Some(post_type) => {
            validate_post_type(&post_type)?;
            post_type
        }
        None => post_type_for(kind).to_string(),
    };

    let shot_date = form.date(SHOT_DATE)?.ok_or_else(|| {
        AppError::Core(CoreError::Validation("Field 'shot_date' is required".into()))
    })?;

    Ok(CreatePost {
        title,
        post_type,
        category: form.required(CATEGORY)?,
        story: form.required(STORY)?,
        location: form.required(LOCATION)?,
        shot_date,
        shot_time: form.text(SHOT_TIME),
        camera: form.text(CAMERA),
        lens: form.text(LENS),
        iso: form.text(ISO),
        aperture: form.text(APERTURE),
        shutter_speed: form.text(SHUTTER_SPEED),
        media_url: None,
        media_key: None,
        tags: form.text(TAGS).map(|raw| parse_tags(&raw)).unwrap_or_default(),
        featured: form.flag(FEATURED)?.unwrap_or(false),
    })
}

/// Build a patch from whichever form fields were sent.
fn post_changes(form: &MultipartForm) -> AppResult<UpdatePost> {
    let title = form.text(TITLE);
    if let Some(title) = &title {
        validate_title(title)?;
    }
    let post_type = form.text(POST_TYPE);
    if let Some(post_type) = &post_type {
        validate_post_type(post_type)?;
    }

    Ok(UpdatePost {
        title,
        post_type,
        category: form.text(CATEGORY),
        story: form.text(STORY),
        location: form.text(LOCATION),
        shot_date: form.date(SHOT_DATE)?,
        shot_time: form.text(SHOT_TIME),
        camera: form.text(CAMERA),
        lens: form.text(LENS),
        iso: form.text(ISO),
        aperture: form.text(APERTURE),
        shutter_speed: form.text(SHUTTER_SPEED),
        media_url: None,
        media_key: None,
        tags: form.text(TAGS).map(|raw| parse_tags(&raw)),
        featured: form.flag(FEATURED)?,
    })
}
