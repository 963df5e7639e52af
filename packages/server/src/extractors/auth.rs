use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

/// Name of the admin session cookie.
pub const SESSION_COOKIE: &str = "admin_session";

/// Proof of a live admin session, extracted from the session cookie.
///
/// Add this as a handler parameter to gate the endpoint. A missing cookie,
/// an unparseable token, and a revoked token all produce the same generic
/// denial.
pub struct AdminSession {
    pub token: Uuid,
}

fn session_from_parts(parts: &Parts, state: &AppState) -> Option<AdminSession> {
    let jar = CookieJar::from_headers(&parts.headers);
    let token = Uuid::parse_str(jar.get(SESSION_COOKIE)?.value()).ok()?;
    state
        .sessions
        .is_valid(&token)
        .then_some(AdminSession { token })
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        session_from_parts(parts, state).ok_or(AppError::Unauthorized)
    }
}

impl OptionalFromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(session_from_parts(parts, state))
    }
}
