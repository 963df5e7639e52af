use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/photos", photo_routes(config))
        .routes(routes!(handlers::health::heartbeat))
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::logout))
        .routes(routes!(handlers::auth::session))
}

fn photo_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::photo::list_photos,
            handlers::photo::upload_photo
        ))
        .routes(routes!(handlers::moderation::approve_photo))
        .routes(routes!(handlers::moderation::reject_photo))
        .routes(routes!(handlers::moderation::reset_photo_to_pending))
        .routes(routes!(handlers::moderation::delete_photo))
        .layer(handlers::photo::upload_body_limit(
            config.upload.max_upload_size,
        ))
}
