//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the terminal client and the
//! backend API. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::auth`]**: Authentication and account DTOs
//!   - **[`dto::discussion`]**: Discussion board DTOs
//!   - **[`dto::market`]**: Stock quote, chart, news and search DTOs
//!   - **[`dto::trading`]**: Balance, order and transaction DTOs
//!
//! ## Wire Format
//!
//! All DTOs serialize with default `serde` behavior: snake_case field names,
//! except where a third-party provider's shape passes through (the quote
//! object keeps Finnhub's short keys, search results keep `displaySymbol`).
//! All structs implement both `Serialize` and `Deserialize` so they can be
//! used on either side of the wire.
//!
//! ## Example Request/Response Pair
//!
//! ```text
//! POST /api/auth/login
//! Content-Type: application/json
//!
//! { "username": "alice", "password": "secret" }
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! {
//!   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
//!   "username": "alice",
//!   "email": "alice@example.com",
//!   "balance": 0.0
//! }
//! ```

pub mod dto;

// Re-export commonly used types for convenience
// Note: Wildcard re-exports are used here since shared is a DTO library
// where all exports are meant to be public API
pub use dto::*;
