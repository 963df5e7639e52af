use thiserror::Error;

/// Errors that can occur during object storage operations.
///
/// Missing configuration is distinguished from a failed call so callers can
/// report a server-fault message for the former without conflating it with
/// transient upload failures.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Object storage is not (fully) configured.
    #[error("object storage is not configured: {0}")]
    Configuration(String),

    /// A storage request failed. Single attempt, no retry.
    #[error("object storage request failed: {0}")]
    Request(String),
}
