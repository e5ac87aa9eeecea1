//! Handlers for the `/gear` resource.
//!
//! A gear item's picture is either an uploaded file owned by the media store
//! or an external `image_url`. Switching from the former to the latter
//! releases the stored blob.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::gear::{parse_specs, validate_gear_type};
use folio_core::types::DbId;
use folio_db::models::gear::{CreateGear, Gear, UpdateGear};
use folio_db::repositories::GearRepo;

use crate::error::{AppError, AppResult};
use crate::form::MultipartForm;
use crate::middleware::rbac::RequireAdmin;
use crate::query::GearListParams;
use crate::state::AppState;

/// Multipart field carrying the picture.
const IMAGE_FIELD: &str = "image";

const NAME: &[&str] = &["name"];
const GEAR_TYPE: &[&str] = &["gear_type", "type"];
const BRAND: &[&str] = &["brand"];
const MODEL: &[&str] = &["model"];
const DESCRIPTION: &[&str] = &["description"];
const IMAGE_URL: &[&str] = &["image_url", "imageUrl"];
const SPECS: &[&str] = &["specs"];
const PURCHASE_DATE: &[&str] = &["purchase_date", "purchaseDate"];
const IN_USE: &[&str] = &["in_use", "inUse"];

/// GET /api/gear
pub async fn list_gear(
    State(state): State<AppState>,
    Query(params): Query<GearListParams>,
) -> AppResult<Json<Vec<Gear>>> {
    let gear_type = params
        .gear_type
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty() && *t != "all");
    if let Some(gear_type) = gear_type {
        validate_gear_type(gear_type)?;
    }

    let gear = GearRepo::list(&state.pool, gear_type).await?;
    Ok(Json(gear))
}

/// POST /api/gear
///
/// Multipart form. The `image` file is optional; without it `image_url`
/// may point at an external picture.
pub async fn create_gear(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<Gear>)> {
    let mut form = MultipartForm::read(&mut multipart, IMAGE_FIELD).await?;
    let upload = form.take_upload(state.config.max_upload_bytes)?;
    let input = new_gear(&form)?;

    let gear = match upload {
        Some(upload) => {
            let pool = state.pool.clone();
            state
                .media
                .create_with_media(upload, |stored| async move {
                    let input = CreateGear {
                        image_url: Some(stored.locator),
                        media_key: Some(stored.key),
                        ..input
                    };
                    GearRepo::create(&pool, &input).await.map_err(AppError::from)
                })
                .await?
        }
        None => GearRepo::create(&state.pool, &input).await?,
    };

    tracing::info!(gear_id = gear.id, user_id = admin.user_id, "Gear created");
    Ok((StatusCode::CREATED, Json(gear)))
}

/// PUT /api/gear/{id}
///
/// With an `image` file the stored picture is replaced. A new external
/// `image_url` without a file detaches and releases any stored picture.
pub async fn update_gear(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<Gear>> {
    let existing = GearRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;

    let mut form = MultipartForm::read(&mut multipart, IMAGE_FIELD).await?;
    let upload = form.take_upload(state.config.max_upload_bytes)?;
    let mut changes = gear_changes(&form)?;

    let gear = match upload {
        Some(upload) => {
            let pool = state.pool.clone();
            state
                .media
                .replace_media(existing.media_key, upload, |stored| async move {
                    let changes = UpdateGear {
                        image_url: Some(stored.locator),
                        media_key: Some(stored.key),
                        ..changes
                    };
                    GearRepo::update(&pool, id, &changes)
                        .await
                        .map_err(AppError::from)
                        .and_then(|gear| gear.ok_or(not_found(id)))
                })
                .await?
        }
        None => {
            let detached = match (&changes.image_url, &existing.media_key) {
                (Some(url), Some(_)) => existing.image_url.as_deref() != Some(url.as_str()),
                _ => false,
            };
            changes.detach_media = detached;

            let gear = GearRepo::update(&state.pool, id, &changes)
                .await?
                .ok_or(not_found(id))?;
            if detached {
                state.media.release(existing.media_key).await;
            }
            gear
        }
    };

    tracing::info!(gear_id = id, user_id = admin.user_id, "Gear updated");
    Ok(Json(gear))
}

/// DELETE /api/gear/{id}
pub async fn delete_gear(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = GearRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;

    let removed = state
        .media
        .delete_record(existing.media_key, || GearRepo::delete(&state.pool, id))
        .await?;
    if !removed {
        return Err(not_found(id));
    }

    tracing::info!(gear_id = id, user_id = admin.user_id, "Gear deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Gear", id })
}

fn new_gear(form: &MultipartForm) -> AppResult<CreateGear> {
    let gear_type = form.required(GEAR_TYPE)?;
    validate_gear_type(&gear_type)?;

    Ok(CreateGear {
        name: form.required(NAME)?,
        gear_type,
        brand: form.text(BRAND),
        model: form.text(MODEL),
        description: form.text(DESCRIPTION),
        image_url: form.text(IMAGE_URL),
        media_key: None,
        specs: form
            .text(SPECS)
            .map(|raw| parse_specs(&raw))
            .transpose()?
            .unwrap_or_default(),
        purchase_date: form.date(PURCHASE_DATE)?,
        in_use: form.flag(IN_USE)?.unwrap_or(true),
    })
}

fn gear_changes(form: &MultipartForm) -> AppResult<UpdateGear> {
    let gear_type = form.text(GEAR_TYPE);
    if let Some(gear_type) = &gear_type {
        validate_gear_type(gear_type)?;
    }

    Ok(UpdateGear {
        name: form.text(NAME),
        gear_type,
        brand: form.text(BRAND),
        model: form.text(MODEL),
        description: form.text(DESCRIPTION),
        image_url: form.text(IMAGE_URL),
        media_key: None,
        specs: form.text(SPECS).map(|raw| parse_specs(&raw)).transpose()?,
        purchase_date: form.date(PURCHASE_DATE)?,
        in_use: form.flag(IN_USE)?,
        detach_media: false,
    })
}
