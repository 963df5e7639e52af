use async_trait::async_trait;
use s3::creds::Credentials;
use s3::{Bucket, Region};

use crate::config::StorageConfig;

use super::error::StorageError;
use super::traits::ObjectStore;

/// S3-compatible object store (Cloudflare R2, MinIO, AWS).
///
/// The bucket handle is resolved per call rather than at construction, so a
/// deployment with missing credentials boots fine and reports a
/// `Configuration` error on first use.
pub struct S3ObjectStore {
    config: StorageConfig,
}

impl S3ObjectStore {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    fn bucket(&self) -> Result<Box<Bucket>, StorageError> {
        let endpoint = require(&self.config.endpoint, "endpoint")?;
        let access_key = require(&self.config.access_key_id, "access_key_id")?;
        let secret_key = require(&self.config.secret_access_key, "secret_access_key")?;
        let bucket_name = require(&self.config.bucket, "bucket")?;

        let credentials = Credentials::new(Some(access_key), Some(secret_key), None, None, None)
            .map_err(|e| StorageError::Configuration(e.to_string()))?;
        let region = Region::Custom {
            region: self.config.region.clone(),
            endpoint: endpoint.to_string(),
        };

        let bucket = Bucket::new(bucket_name, region, credentials)
            .map_err(|e| StorageError::Configuration(e.to_string()))?
            .with_path_style();
        Ok(bucket)
    }
}

fn require<'a>(field: &'a Option<String>, name: &str) -> Result<&'a str, StorageError> {
    field
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| StorageError::Configuration(format!("missing storage.{name}")))
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<(), StorageError> {
        let bucket = self.bucket()?;
        let response = bucket
            .put_object_with_content_type(key, bytes, content_type)
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;

        if response.status_code() >= 300 {
            return Err(StorageError::Request(format!(
                "put of '{key}' returned HTTP {}",
                response.status_code()
            )));
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let bucket = self.bucket()?;
        let response = bucket
            .delete_object(key)
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;

        if response.status_code() >= 300 {
            return Err(StorageError::Request(format!(
                "delete of '{key}' returned HTTP {}",
                response.status_code()
            )));
        }
        Ok(())
    }

    async fn signed_url(&self, key: &str, expiry_secs: u32) -> Result<String, StorageError> {
        let bucket = self.bucket()?;
        bucket
            .presign_get(key, expiry_secs, None)
            .await
            .map_err(|e| StorageError::Request(e.to_string()))
    }
}
