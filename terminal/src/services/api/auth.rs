//! # Authentication Endpoints
//!
//! Handles user authentication (login and registration).

use super::client::ApiClient;
use shared::{ErrorResponse, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};

/// Login with username and password.
#[tracing::instrument(skip(client, password), fields(username = %username))]
pub async fn login(
    client: &ApiClient,
    username: String,
    password: String,
) -> Result<LoginResponse, String> {
    tracing::info!("Attempting login");
    let start = std::time::Instant::now();

    let request = LoginRequest { username, password };

    let response = client
        .client
        .post(format!("{}/api/auth/login", client.base_url()))
        .json(&request)
        .send()
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Login network error");
            format!("Network error: {}", e)
        })?;

    let status = response.status();
    let duration = start.elapsed();

    if status.is_success() {
        let result = response.json::<LoginResponse>().await.map_err(|e| {
            tracing::error!(error = %e, "Login response parse error");
            format!("Failed to parse response: {}", e)
        });

        if result.is_ok() {
            tracing::info!(duration_ms = duration.as_millis(), "Login successful");
        }
        result
    } else {
        let error = response
            .json::<ErrorResponse>()
            .await
            .map_err(|e| format!("Failed to parse error: {}", e))?;

        tracing::warn!(
            status = status.as_u16(),
            error = %error.error,
            duration_ms = duration.as_millis(),
            "Login failed"
        );
        Err(error.error)
    }
}

/// Register a new account.
pub async fn register(
    client: &ApiClient,
    username: String,
    email: String,
    password: String,
) -> Result<RegisterResponse, String> {
    let request = RegisterRequest {
        username,
        email,
        password,
    };

    let response = client
        .client
        .post(format!("{}/api/auth/register", client.base_url()))
        .json(&request)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<RegisterResponse>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        let error = response
            .json::<ErrorResponse>()
            .await
            .map_err(|e| format!("Failed to parse error: {}", e))?;
        Err(error.error)
    }
}
