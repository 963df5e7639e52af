use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Request body for admin login.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    /// The shared admin password.
    pub password: String,
}

pub fn validate_login_request(payload: &LoginRequest) -> Result<(), AppError> {
    if payload.password.is_empty() {
        return Err(AppError::Validation("Password must not be empty".into()));
    }
    Ok(())
}

/// Successful login response. The session token travels in the cookie, not
/// the body.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub authenticated: bool,
}

/// Response for the session probe endpoint.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SessionResponse {
    pub authenticated: bool,
}
