//! # Discussion Board Data Transfer Objects
//!
//! Request and response structures for the discussion feed endpoints.

use serde::{Deserialize, Serialize};

/// A discussion board message. Created via POST, immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub id: i64,
    pub content: String,
    pub username: String,
    /// RFC 3339 creation timestamp, assigned by the server.
    pub created_at: String,
}

/// Body of `POST /api/discussions`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewMessageRequest {
    pub content: String,
}
