use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::PhotoStatus;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminSession;
use crate::models::photo::PhotoResponse;
use crate::moderation::ModerationService;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/{id}/approve",
    tag = "Moderation",
    operation_id = "approvePhoto",
    summary = "Approve a photo",
    description = "Sets status to `approved` and stamps `approved_at`, putting the photo on the \
        public display feed.",
    params(("id" = i32, Path, description = "Photo ID")),
    responses(
        (status = 200, description = "Updated photo", body = PhotoResponse),
        (status = 401, description = "No admin session (UNAUTHORIZED)", body = ErrorBody),
        (status = 404, description = "Photo not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("admin_session" = [])),
)]
#[instrument(skip(state, _session))]
pub async fn approve_photo(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PhotoResponse>, AppError> {
    let photo = ModerationService::new(&state.db, state.store.as_ref())
        .set_status(id, PhotoStatus::Approved)
        .await?;
    Ok(Json(photo.into()))
}

#[utoipa::path(
    post,
    path = "/{id}/reject",
    tag = "Moderation",
    operation_id = "rejectPhoto",
    summary = "Reject a photo",
    description = "Sets status to `rejected` and clears `approved_at`, hiding the photo from the \
        feed.",
    params(("id" = i32, Path, description = "Photo ID")),
    responses(
        (status = 200, description = "Updated photo", body = PhotoResponse),
        (status = 401, description = "No admin session (UNAUTHORIZED)", body = ErrorBody),
        (status = 404, description = "Photo not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("admin_session" = [])),
)]
#[instrument(skip(state, _session))]
pub async fn reject_photo(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PhotoResponse>, AppError> {
    let photo = ModerationService::new(&state.db, state.store.as_ref())
        .set_status(id, PhotoStatus::Rejected)
        .await?;
    Ok(Json(photo.into()))
}

#[utoipa::path(
    post,
    path = "/{id}/pending",
    tag = "Moderation",
    operation_id = "resetPhotoToPending",
    summary = "Return a photo to the moderation queue",
    description = "Sets status back to `pending` from any prior status and clears `approved_at`.",
    params(("id" = i32, Path, description = "Photo ID")),
    responses(
        (status = 200, description = "Updated photo", body = PhotoResponse),
        (status = 401, description = "No admin session (UNAUTHORIZED)", body = ErrorBody),
        (status = 404, description = "Photo not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("admin_session" = [])),
)]
#[instrument(skip(state, _session))]
pub async fn reset_photo_to_pending(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PhotoResponse>, AppError> {
    let photo = ModerationService::new(&state.db, state.store.as_ref())
        .set_status(id, PhotoStatus::Pending)
        .await?;
    Ok(Json(photo.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Moderation",
    operation_id = "deletePhoto",
    summary = "Delete a photo",
    description = "Attempts the blob delete first (best-effort), then removes the record \
        unconditionally.",
    params(("id" = i32, Path, description = "Photo ID")),
    responses(
        (status = 204, description = "Photo deleted"),
        (status = 401, description = "No admin session (UNAUTHORIZED)", body = ErrorBody),
        (status = 404, description = "Photo not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("admin_session" = [])),
)]
#[instrument(skip(state, _session))]
pub async fn delete_photo(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    ModerationService::new(&state.db, state.store.as_ref())
        .delete(id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
