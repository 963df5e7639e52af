use chrono::Utc;
use common::PhotoStatus;
use common::storage::ObjectStore;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, Order, QueryFilter, QueryOrder,
    Set, sea_query::NullOrdering,
};

use crate::config::UploadConfig;
use crate::entity::photo;
use crate::error::AppError;
use crate::utils::filename::{extension_allowed, storage_key};

/// A validated-input upload: raw bytes plus the metadata the guest supplied.
pub struct UploadRequest {
    pub bytes: Vec<u8>,
    /// Content type declared by the client, if any.
    pub content_type: Option<String>,
    pub original_filename: String,
    pub caption: String,
}

/// The moderation workflow: the upload saga, admin status transitions, and
/// the status-filtered feed query.
///
/// The upload is a two-step write across the object store and the record
/// store with a compensating blob delete; it is deliberately not
/// transactional, so a crash between the two writes can orphan a blob. That
/// window is accepted and not papered over here.
pub struct ModerationService<'a, C: ConnectionTrait> {
    conn: &'a C,
    store: &'a dyn ObjectStore,
}

impl<'a, C: ConnectionTrait> ModerationService<'a, C> {
    pub fn new(conn: &'a C, store: &'a dyn ObjectStore) -> Self {
        Self { conn, store }
    }

    /// Upload a photo: validate, write the blob, then create the pending
    /// record. If the record insert fails, the just-written blob is deleted
    /// best-effort so the two stores stay consistent.
    pub async fn upload(
        &self,
        request: UploadRequest,
        limits: &UploadConfig,
    ) -> Result<photo::Model, AppError> {
        let caption = request.caption.trim();
        if caption.is_empty() {
            return Err(AppError::Validation("Caption is required".into()));
        }
        if request.original_filename.is_empty() {
            return Err(AppError::Validation("No photo selected".into()));
        }
        if !extension_allowed(&request.original_filename, &limits.allowed_extensions) {
            return Err(AppError::Validation("Invalid file type".into()));
        }
        if request.bytes.len() as u64 > limits.max_upload_size {
            return Err(AppError::PayloadTooLarge);
        }

        let key = storage_key(&request.original_filename);
        let content_type = request.content_type.clone().unwrap_or_else(|| {
            mime_guess::from_path(&request.original_filename)
                .first_or_octet_stream()
                .to_string()
        });

        // Step 1: blob write. Failure aborts with no record created.
        self.store.put(&key, &request.bytes, &content_type).await?;

        // Step 2: record write, compensating on failure.
        let model = photo::ActiveModel {
            filename: Set(key.clone()),
            caption: Set(caption.to_string()),
            status: Set(PhotoStatus::Pending),
            uploaded_at: Set(Utc::now()),
            approved_at: Set(None),
            ..Default::default()
        };

        match model.insert(self.conn).await {
            Ok(created) => Ok(created),
            Err(db_err) => {
                match self.store.delete(&key).await {
                    Ok(()) => {
                        tracing::warn!(key = %key, "Deleted orphaned blob after record insert failure")
                    }
                    Err(cleanup_err) => tracing::error!(
                        key = %key,
                        error = %cleanup_err,
                        "Failed to clean up orphaned blob after record insert failure"
                    ),
                }
                Err(AppError::from(db_err))
            }
        }
    }

    pub async fn get(&self, id: i32) -> Result<photo::Model, AppError> {
        photo::Entity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or_else(|| AppError::NotFound("Photo not found".into()))
    }

    /// Move a photo to `status`, keeping `approved_at` consistent: set on
    /// approval, cleared on any other transition.
    pub async fn set_status(
        &self,
        id: i32,
        status: PhotoStatus,
    ) -> Result<photo::Model, AppError> {
        let mut active: photo::ActiveModel = self.get(id).await?.into();
        active.status = Set(status);
        active.approved_at = Set(match status {
            PhotoStatus::Approved => Some(Utc::now()),
            PhotoStatus::Pending | PhotoStatus::Rejected => None,
        });
        Ok(active.update(self.conn).await?)
    }

    /// Delete a photo: blob delete is attempted first and is best-effort;
    /// the record is removed regardless of its outcome.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let existing = self.get(id).await?;

        if let Err(err) = self.store.delete(&existing.filename).await {
            tracing::warn!(
                filename = %existing.filename,
                error = %err,
                "Blob delete failed, removing record anyway"
            );
        }

        photo::Entity::delete_by_id(id).exec(self.conn).await?;
        Ok(())
    }

    /// List photos with the given status, newest approval first. NULL
    /// `approved_at` values sort after all non-NULL ones on every backend.
    pub async fn list(&self, status: PhotoStatus) -> Result<Vec<photo::Model>, AppError> {
        Ok(photo::Entity::find()
            .filter(photo::Column::Status.eq(status))
            .order_by_with_nulls(photo::Column::ApprovedAt, Order::Desc, NullOrdering::Last)
            .all(self.conn)
            .await?)
    }
}
