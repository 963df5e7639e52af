use std::sync::Arc;

use common::storage::ObjectStore;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::notify::Notifier;
use crate::sessions::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub store: Arc<dyn ObjectStore>,
    pub sessions: SessionStore,
    pub notifier: Notifier,
    pub config: Arc<AppConfig>,
}
