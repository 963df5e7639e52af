use std::net::SocketAddr;
use std::sync::Arc;

// Leading `::` disambiguates the `common` crate from this test module.
use ::common::storage::{MemoryObjectStore, ObjectStore};
use reqwest::Client;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use serde_json::Value;

use server::config::{
    AdminConfig, AppConfig, CorsConfig, DatabaseConfig, PushoverConfig, ServerConfig,
    StorageConfig, UploadConfig,
};
use server::entity::photo;
use server::notify::Notifier;
use server::sessions::SessionStore;
use server::state::AppState;

/// Shared secret configured for every test server.
pub const ADMIN_PASSWORD: &str = "test-admin-password";

pub mod routes {
    pub const LOGIN: &str = "/api/v1/auth/login";
    pub const LOGOUT: &str = "/api/v1/auth/logout";
    pub const SESSION: &str = "/api/v1/auth/session";
    pub const PHOTOS: &str = "/api/v1/photos";
    pub const HEARTBEAT: &str = "/api/v1/heartbeat";

    pub fn photos_with_status(status: &str) -> String {
        format!("/api/v1/photos?status={status}")
    }

    pub fn approve(id: i64) -> String {
        format!("/api/v1/photos/{id}/approve")
    }

    pub fn reject(id: i64) -> String {
        format!("/api/v1/photos/{id}/reject")
    }

    pub fn pending(id: i64) -> String {
        format!("/api/v1/photos/{id}/pending")
    }

    pub fn photo(id: i64) -> String {
        format!("/api/v1/photos/{id}")
    }

    pub fn uploads(filename: &str) -> String {
        format!("/uploads/{filename}")
    }
}

/// Knobs a test can turn before spawning the server.
pub struct TestOptions {
    pub max_upload_size: u64,
    pub notifications: Option<PushoverConfig>,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            max_upload_size: UploadConfig::default().max_upload_size,
            notifications: None,
        }
    }
}

/// A running test server over an in-memory SQLite database and an in-memory
/// object store.
pub struct TestApp {
    pub addr: SocketAddr,
    /// Cookie-holding client: logging in once authenticates later requests.
    pub client: Client,
    pub db: DatabaseConnection,
    pub store: Arc<MemoryObjectStore>,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestResponse {
    async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(TestOptions::default()).await
    }

    pub async fn spawn_with(options: TestOptions) -> Self {
        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cookie_secure: false,
                cors: CorsConfig::default(),
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                // A second in-memory connection would see a different
                // database, so the pool must stay at one.
                max_connections: 1,
            },
            admin: AdminConfig {
                password: ADMIN_PASSWORD.to_string(),
            },
            storage: StorageConfig::default(),
            upload: UploadConfig {
                max_upload_size: options.max_upload_size,
                ..Default::default()
            },
            notifications: options.notifications,
        };

        let db = server::database::init_db(&config.database)
            .await
            .expect("Failed to initialize test database");

        let store = Arc::new(MemoryObjectStore::new());
        let store_dyn: Arc<dyn ObjectStore> = store.clone();

        let state = AppState {
            db: db.clone(),
            store: store_dyn,
            sessions: SessionStore::new(),
            notifier: Notifier::new(config.notifications.clone()),
            config: Arc::new(config),
        };

        let app = server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to build HTTP client");

        Self {
            addr,
            client,
            db,
            store,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Log in with the shared admin password; the session cookie sticks to
    /// `self.client`.
    pub async fn login_admin(&self) {
        let res = self
            .post_json(routes::LOGIN, &serde_json::json!({ "password": ADMIN_PASSWORD }))
            .await;
        assert_eq!(res.status, 200, "Login failed: {}", res.text);
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn post_empty(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    /// GET without the session cookie jar, for exercising the public surface.
    pub async fn get_anonymous(&self, path: &str) -> TestResponse {
        let res = Client::new()
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to send DELETE request");

        TestResponse::from_response(res).await
    }

    pub async fn upload_photo(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        mime: &str,
        caption: Option<&str>,
    ) -> TestResponse {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)
            .expect("Failed to set MIME type");
        let mut form = reqwest::multipart::Form::new().part("photo", part);
        if let Some(caption) = caption {
            form = form.text("caption", caption.to_string());
        }

        let res = self
            .client
            .post(self.url(routes::PHOTOS))
            .multipart(form)
            .send()
            .await
            .expect("Failed to send multipart upload request");

        TestResponse::from_response(res).await
    }

    /// Upload and assert success, returning (id, filename).
    pub async fn upload_photo_ok(&self, file_name: &str, caption: &str) -> (i64, String) {
        let res = self
            .upload_photo(file_name, b"IMAGE_DATA".to_vec(), "image/jpeg", Some(caption))
            .await;
        assert_eq!(res.status, 201, "Upload failed: {}", res.text);
        (
            res.body["id"].as_i64().unwrap(),
            res.body["filename"].as_str().unwrap().to_string(),
        )
    }

    pub async fn photo_count(&self) -> u64 {
        photo::Entity::find()
            .count(&self.db)
            .await
            .expect("Failed to count photos")
    }
}
