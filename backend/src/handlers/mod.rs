pub mod auth;
pub mod discussion;
pub mod market;
pub mod trading;

use crate::auth::{decode_jwt, Claims};
use crate::config::Config;
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use axum::Json;
use shared::ErrorResponse;
use tracing::warn;

/// Extract and validate the bearer token carried by a protected request.
pub(crate) fn authenticate(
    headers: &HeaderMap,
    config: &Config,
) -> Result<Claims, (StatusCode, Json<ErrorResponse>)> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            warn!("[AUTH] Missing Authorization header");
            unauthorized("Token is missing")
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        warn!("[AUTH] Invalid Authorization header format");
        unauthorized("Token is missing")
    })?;

    decode_jwt(token, &config.jwt_secret).map_err(|e| {
        warn!("[AUTH] JWT validation failed: {}", e);
        unauthorized("Token is invalid")
    })
}

fn unauthorized(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

#[cfg(test)]
mod tests;
