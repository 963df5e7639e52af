use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, response::IntoResponse};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::{AdminSession, SESSION_COOKIE};
use crate::extractors::json::AppJson;
use crate::models::auth::{LoginRequest, LoginResponse, SessionResponse, validate_login_request};
use crate::state::AppState;

/// Authenticate with the shared admin password and start a session.
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    operation_id = "login",
    summary = "Start an admin session",
    description = "Compares the submitted password against the configured shared secret. \
        On success a session token is set as a browser-session cookie.",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session started", body = LoginResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Wrong password (INVALID_CREDENTIALS)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, jar, payload))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_login_request(&payload)?;

    if payload.password != state.config.admin.password {
        return Err(AppError::InvalidCredentials);
    }

    let token = state.sessions.issue();
    let cookie = Cookie::build((SESSION_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.server.cookie_secure)
        .build();

    Ok((jar.add(cookie), Json(LoginResponse { authenticated: true })))
}

/// End the admin session, if any. Never fails.
#[utoipa::path(
    post,
    path = "/logout",
    tag = "Auth",
    operation_id = "logout",
    summary = "End the admin session",
    responses(
        (status = 204, description = "Session ended (or none existed)"),
    ),
)]
#[instrument(skip(state, jar))]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = match jar.get(SESSION_COOKIE) {
        Some(cookie) => {
            if let Ok(token) = Uuid::parse_str(cookie.value()) {
                state.sessions.revoke(&token);
            }
            jar.remove(Cookie::build(SESSION_COOKIE).path("/").build())
        }
        None => jar,
    };

    (jar, StatusCode::NO_CONTENT)
}

/// Probe whether the caller holds a live admin session.
#[utoipa::path(
    get,
    path = "/session",
    tag = "Auth",
    operation_id = "session",
    summary = "Check the admin session",
    responses(
        (status = 200, description = "Session is live", body = SessionResponse),
        (status = 401, description = "No live session (UNAUTHORIZED)", body = ErrorBody),
    ),
    security(("admin_session" = [])),
)]
pub async fn session(_session: AdminSession) -> Json<SessionResponse> {
    Json(SessionResponse {
        authenticated: true,
    })
}
