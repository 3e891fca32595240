//! # Discussion Board Handlers
//!
//! HTTP endpoints for the authenticated discussion feed.
//!
//! ## Endpoints
//!
//! - `GET /api/discussions` - Latest messages, newest first
//! - `POST /api/discussions` - Create a message

use super::authenticate;
use crate::{
    config::Config,
    database::{repository::MessageRepository, DbPool},
};
use axum::{
    extract::{Json, State},
    http::{HeaderMap, StatusCode},
};
use shared::{ErrorResponse, Message, NewMessageRequest};
use tracing::{debug, error, info};

/// Messages returned per fetch; the feed is a rolling window, not a page.
const MESSAGE_LIMIT: i64 = 100;

fn to_dto(row: crate::database::models::MessageWithAuthor) -> Message {
    Message {
        id: row.id,
        content: row.content,
        username: row.username,
        created_at: row.created_at.and_utc().to_rfc3339(),
    }
}

/// List the most recent messages, newest first.
pub async fn list_messages(
    State(pool): State<DbPool>,
    State(config): State<Config>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<Vec<Message>>), (StatusCode, Json<ErrorResponse>)> {
    let claims = authenticate(&headers, &config)?;
    debug!("[DISCUSSION] Listing messages for {}", claims.username);

    match MessageRepository::list_recent(&pool, MESSAGE_LIMIT).await {
        Ok(rows) => {
            let messages: Vec<Message> = rows.into_iter().map(to_dto).collect();
            debug!("[DISCUSSION] Returning {} messages", messages.len());
            Ok((StatusCode::OK, Json(messages)))
        }
        Err(e) => {
            error!("[DISCUSSION] Failed to list messages: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Database error".to_string(),
                }),
            ))
        }
    }
}

/// Create a new message authored by the authenticated user.
pub async fn create_message(
    State(pool): State<DbPool>,
    State(config): State<Config>,
    headers: HeaderMap,
    Json(req): Json<NewMessageRequest>,
) -> Result<(StatusCode, Json<Message>), (StatusCode, Json<ErrorResponse>)> {
    let claims = authenticate(&headers, &config)?;

    if req.content.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Message content is required".to_string(),
            }),
        ));
    }

    let user_id = claims.user_id().map_err(|e| {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse { error: e }),
        )
    })?;

    match MessageRepository::create(&pool, user_id, &req.content).await {
        Ok(row) => {
            info!(
                "[DISCUSSION] Message {} posted by {}",
                row.id, claims.username
            );
            Ok((StatusCode::CREATED, Json(to_dto(row))))
        }
        Err(e) => {
            error!("[DISCUSSION] Failed to create message: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create message".to_string(),
                }),
            ))
        }
    }
}
