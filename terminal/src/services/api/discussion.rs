//! # Discussion Endpoints
//!
//! Authenticated reads and writes against the discussion board.

use super::client::ApiClient;
use shared::{ErrorResponse, Message, NewMessageRequest};

/// Fetch the feed, newest first.
pub async fn get_messages(client: &ApiClient, token: &str) -> Result<Vec<Message>, String> {
    let response = client
        .client
        .get(format!("{}/api/discussions", client.base_url()))
        .bearer_auth(token)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Vec<Message>>()
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

/// Post a message; the server returns the stored copy with id and timestamp.
pub async fn post_message(
    client: &ApiClient,
    token: &str,
    content: &str,
) -> Result<Message, String> {
    let request = NewMessageRequest {
        content: content.to_string(),
    };

    let response = client
        .client
        .post(format!("{}/api/discussions", client.base_url()))
        .bearer_auth(token)
        .json(&request)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Message>()
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
