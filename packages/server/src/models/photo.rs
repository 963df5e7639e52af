use chrono::{DateTime, Utc};
use common::PhotoStatus;
use serde::{Deserialize, Serialize};

use crate::entity::photo;

/// Response DTO for a single photo.
#[derive(Serialize, utoipa::ToSchema)]
pub struct PhotoResponse {
    #[schema(example = 42)]
    pub id: i32,
    /// Blob-store key; fetch the image via `/uploads/{filename}`.
    #[schema(example = "1717171717000_9f3ab2c1_cat.jpg")]
    pub filename: String,
    #[schema(example = "Hi!")]
    pub caption: String,
    pub status: PhotoStatus,
    pub uploaded_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
}

/// Response DTO for listing photos.
#[derive(Serialize, utoipa::ToSchema)]
pub struct PhotoListResponse {
    pub photos: Vec<PhotoResponse>,
    pub total: u64,
}

impl From<photo::Model> for PhotoResponse {
    fn from(model: photo::Model) -> Self {
        Self {
            id: model.id,
            filename: model.filename,
            caption: model.caption,
            status: model.status,
            uploaded_at: model.uploaded_at,
            approved_at: model.approved_at,
        }
    }
}

/// Query parameters for the photo list endpoint.
#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Status filter. Defaults to `approved`; anything else requires an
    /// admin session.
    pub status: Option<PhotoStatus>,
}
