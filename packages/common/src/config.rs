use serde::Deserialize;

/// Object storage (S3-compatible bucket) configuration.
///
/// All connection fields are optional: the store resolves them per call and
/// reports a `StorageError::Configuration` when any are missing, so an
/// unconfigured deployment fails on first use rather than at boot.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// S3-compatible endpoint URL (e.g. an R2 account endpoint).
    pub endpoint: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    /// Bucket holding uploaded photos.
    pub bucket: Option<String>,
    /// Region name. Default: "auto" (R2 convention).
    #[serde(default = "default_region")]
    pub region: String,
    /// Lifetime of presigned retrieval URLs, in seconds. Default: 3600.
    #[serde(default = "default_signed_url_ttl")]
    pub signed_url_ttl: u32,
}

fn default_region() -> String {
    "auto".into()
}

fn default_signed_url_ttl() -> u32 {
    3600
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            access_key_id: None,
            secret_access_key: None,
            bucket: None,
            region: default_region(),
            signed_url_ttl: default_signed_url_ttl(),
        }
    }
}
