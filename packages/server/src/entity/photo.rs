use common::PhotoStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "photo")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Blob-store key, derived at upload time. Uniqueness prevents blob
    /// collisions across concurrent uploads.
    #[sea_orm(unique)]
    pub filename: String,

    #[sea_orm(column_type = "Text")]
    pub caption: String,

    pub status: PhotoStatus,

    pub uploaded_at: DateTimeUtc,

    /// Non-null exactly while `status` is `approved`.
    pub approved_at: Option<DateTimeUtc>,
}

impl ActiveModelBehavior for ActiveModel {}
