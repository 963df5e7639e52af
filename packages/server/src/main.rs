use std::sync::Arc;

use common::storage::{ObjectStore, S3ObjectStore};
use tokio::net::TcpListener;
use tracing::{Level, info};

use server::config::AppConfig;
use server::database;
use server::notify::Notifier;
use server::sessions::SessionStore;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let db = database::init_db(&config.database).await?;
    let store: Arc<dyn ObjectStore> = Arc::new(S3ObjectStore::new(config.storage.clone()));
    let notifier = Notifier::new(config.notifications.clone());

    let state = AppState {
        db,
        store,
        sessions: SessionStore::new(),
        notifier,
        config: Arc::new(config),
    };

    let addr = format!(
        "{}:{}",
        state.config.server.host, state.config.server.port
    );
    let app = server::build_router(state);

    let listener = TcpListener::bind(&addr).await?;
    info!("Server running at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
