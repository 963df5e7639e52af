use async_trait::async_trait;

use super::error::StorageError;

/// Key-addressed blob storage for uploaded photos.
///
/// Implementations make exactly one attempt per call; retry policy is the
/// caller's concern (and this application never retries).
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload a blob under `key` with the given content type.
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<(), StorageError>;

    /// Delete the blob under `key`.
    ///
    /// Callers treating deletion as best-effort log and ignore the error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Produce a time-limited URL granting read access to `key` without
    /// exposing permanent credentials.
    async fn signed_url(&self, key: &str, expiry_secs: u32) -> Result<String, StorageError>;
}
