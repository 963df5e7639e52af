use axum::extract::{DefaultBodyLimit, Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Redirect};
use axum::Json;
use common::PhotoStatus;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminSession;
use crate::models::photo::{ListQuery, PhotoListResponse, PhotoResponse};
use crate::moderation::{ModerationService, UploadRequest};
use crate::state::AppState;

pub fn upload_body_limit(max_upload_size: u64) -> DefaultBodyLimit {
    // Slack covers multipart framing and the caption field; the per-file
    // size check is the authoritative one.
    DefaultBodyLimit::max(max_upload_size as usize + 64 * 1024)
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Photos",
    operation_id = "uploadPhoto",
    summary = "Upload a photo",
    description = "Accepts a multipart form with a `photo` file and a `caption` text field. \
        The blob is written to object storage first, then the record is created with status \
        `pending`; if the record write fails the blob is cleaned up best-effort.",
    request_body(content_type = "multipart/form-data", description = "Photo file plus caption"),
    responses(
        (status = 201, description = "Photo accepted for moderation", body = PhotoResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 413, description = "File too large (PAYLOAD_TOO_LARGE)", body = ErrorBody),
        (status = 500, description = "Storage or database fault", body = ErrorBody),
    ),
)]
#[instrument(skip(state, headers, multipart))]
pub async fn upload_photo(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let limits = &state.config.upload;

    // Reject oversized requests from the declared length before reading the
    // body at all.
    if let Some(length) = content_length(&headers)
        && length > limits.max_upload_size
    {
        return Err(AppError::PayloadTooLarge);
    }

    let mut bytes: Option<Vec<u8>> = None;
    let mut original_filename: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut caption: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        match field.name() {
            Some("photo") => {
                original_filename = field.file_name().map(|s| s.to_string());
                content_type = field.content_type().map(|s| s.to_string());
                bytes = Some(read_field_limited(field, limits.max_upload_size).await?);
            }
            Some("caption") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read caption: {e}")))?;
                caption = Some(text);
            }
            _ => {} // Ignore unknown fields.
        }
    }

    let bytes = bytes.ok_or_else(|| AppError::Validation("No photo uploaded".into()))?;
    let original_filename =
        original_filename.ok_or_else(|| AppError::Validation("No photo selected".into()))?;

    let request = UploadRequest {
        bytes,
        content_type,
        original_filename,
        caption: caption.unwrap_or_default(),
    };

    let photo = ModerationService::new(&state.db, state.store.as_ref())
        .upload(request, limits)
        .await?;

    // Best-effort; never alters the response.
    state.notifier.photo_uploaded(&photo.caption);

    Ok((StatusCode::CREATED, Json(PhotoResponse::from(photo))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Photos",
    operation_id = "listPhotos",
    summary = "List photos by status",
    description = "Returns photos with the given status, newest approval first. The `approved` \
        listing is public (it backs the display feed); any other status requires an admin session.",
    params(ListQuery),
    responses(
        (status = 200, description = "Photo list", body = PhotoListResponse),
        (status = 401, description = "Non-approved listing without a session (UNAUTHORIZED)", body = ErrorBody),
    ),
    security((), ("admin_session" = [])),
)]
#[instrument(skip(state, session, query))]
pub async fn list_photos(
    session: Option<AdminSession>,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<PhotoListResponse>, AppError> {
    let status = query.status.unwrap_or(PhotoStatus::Approved);
    if !status.is_public() && session.is_none() {
        return Err(AppError::Unauthorized);
    }

    let photos = ModerationService::new(&state.db, state.store.as_ref())
        .list(status)
        .await?;

    let total = photos.len() as u64;
    Ok(Json(PhotoListResponse {
        photos: photos.into_iter().map(PhotoResponse::from).collect(),
        total,
    }))
}

#[utoipa::path(
    get,
    path = "/uploads/{filename}",
    tag = "Photos",
    operation_id = "servePhoto",
    summary = "Fetch a photo by its storage key",
    description = "Redirects to a time-limited presigned URL so clients fetch the blob directly \
        from the object store.",
    params(("filename" = String, Path, description = "Blob-store key")),
    responses(
        (status = 307, description = "Redirect to the presigned URL"),
        (status = 404, description = "Presigning failed (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn serve_photo(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Redirect, AppError> {
    let url = state
        .store
        .signed_url(&filename, state.config.storage.signed_url_ttl)
        .await
        .map_err(|err| {
            tracing::error!(filename = %filename, error = %err, "Failed to generate presigned URL");
            AppError::NotFound("File not found".into())
        })?;

    Ok(Redirect::temporary(&url))
}

fn content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::Validation(format!("Multipart error: {err}"))
    }
}

/// Stream a multipart field into memory, enforcing the size limit as chunks
/// arrive.
async fn read_field_limited(
    mut field: axum::extract::multipart::Field<'_>,
    max_size: u64,
) -> Result<Vec<u8>, AppError> {
    let mut buf: Vec<u8> = Vec::new();

    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        if (buf.len() + chunk.len()) as u64 > max_size {
            return Err(AppError::PayloadTooLarge);
        }
        buf.extend_from_slice(&chunk);
    }

    Ok(buf)
}
