use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Liveness probe response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct HeartbeatResponse {
    #[schema(example = "ok")]
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

#[utoipa::path(
    get,
    path = "/heartbeat",
    tag = "Photos",
    operation_id = "heartbeat",
    summary = "Liveness check",
    responses(
        (status = 200, description = "Server is alive", body = HeartbeatResponse),
    ),
)]
pub async fn heartbeat() -> Json<HeartbeatResponse> {
    Json(HeartbeatResponse {
        status: "ok".into(),
        timestamp: Utc::now(),
    })
}
