use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub use common::config::StorageConfig;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    #[serde(default)]
    pub allow_origins: Vec<String>,
    #[serde(default = "default_cors_max_age")]
    pub max_age: u64,
}

fn default_cors_max_age() -> u64 {
    3600
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origins: Vec::new(),
            max_age: default_cors_max_age(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Set the `Secure` flag on the admin session cookie. Enable behind TLS.
    pub cookie_secure: bool,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

/// Admin gate configuration. The shared secret is required: config loading
/// fails without it rather than leaving the moderation surface unreachable.
#[derive(Debug, Deserialize, Clone)]
pub struct AdminConfig {
    pub password: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    /// Maximum accepted photo size in bytes. Default: 16 MiB.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: u64,
    /// Accepted file extensions, compared case-insensitively.
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

fn default_max_upload_size() -> u64 {
    16 * 1024 * 1024
}

fn default_allowed_extensions() -> Vec<String> {
    ["png", "jpg", "jpeg", "gif", "heic"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_upload_size: default_max_upload_size(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

/// Pushover credentials for the upload notification sink. The whole section
/// is optional; when absent, notifications are a silent no-op.
#[derive(Debug, Deserialize, Clone)]
pub struct PushoverConfig {
    pub app_token: String,
    pub user_key: String,
    /// Message API endpoint. Overridable so tests can point at a fixture.
    #[serde(default = "default_pushover_api_url")]
    pub api_url: String,
    /// Optional link attached to the notification (admin dashboard).
    #[serde(default)]
    pub dashboard_url: Option<String>,
}

fn default_pushover_api_url() -> String {
    "https://api.pushover.net/1/messages.json".into()
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub admin: AdminConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub notifications: Option<PushoverConfig>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cookie_secure", false)?
            // SQLite fallback for local development; Postgres in production.
            .set_default("database.url", "sqlite://snapwall.db?mode=rwc")?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., SNAPWALL__ADMIN__PASSWORD)
            .add_source(Environment::with_prefix("SNAPWALL").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
