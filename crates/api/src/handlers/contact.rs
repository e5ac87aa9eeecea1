//! Handlers for the `/contact` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::contact::{validate_status, MAX_MESSAGE_LENGTH};
use folio_core::error::CoreError;
use folio_core::types::DbId;
use folio_db::models::contact::{ContactMessage, CreateContactMessage};
use folio_db::repositories::ContactRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::query::ContactListParams;
use crate::state::AppState;

/// Request body for `POST /contact`.
#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 200))]
    pub subject: Option<String>,
    #[validate(length(min = 1, max = MAX_MESSAGE_LENGTH))]
    pub message: String,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[serde(alias = "projectType")]
    #[validate(length(max = 100))]
    pub project_type: Option<String>,
}

/// Request body for `PUT /contact/{id}`.
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

/// POST /api/contact
pub async fn submit_message(
    State(state): State<AppState>,
    Json(input): Json<ContactRequest>,
) -> AppResult<(StatusCode, Json<ContactMessage>)> {
    input.validate()?;

    let message = ContactRepo::create(
        &state.pool,
        &CreateContactMessage {
            name: input.name.trim().to_string(),
            email: input.email.trim().to_lowercase(),
            subject: non_blank(input.subject),
            message: input.message.trim().to_string(),
            phone: non_blank(input.phone),
            project_type: non_blank(input.project_type),
        },
    )
    .await?;

    tracing::info!(message_id = message.id, "Contact message received");
    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /api/contact
pub async fn list_messages(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ContactListParams>,
) -> AppResult<Json<Vec<ContactMessage>>> {
    let status = params
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "all");
    if let Some(status) = status {
        validate_status(status)?;
    }

    let messages = ContactRepo::list(&state.pool, status).await?;
    Ok(Json(messages))
}

/// PUT /api/contact/{id}
pub async fn update_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<StatusUpdate>,
) -> AppResult<Json<ContactMessage>> {
    let status = input.status.trim();
    validate_status(status)?;

    let message = ContactRepo::update_status(&state.pool, id, status)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "ContactMessage",
            id,
        })?;

    tracing::info!(
        message_id = id,
        status,
        user_id = admin.user_id,
        "Contact message status updated",
    );
    Ok(Json(message))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
