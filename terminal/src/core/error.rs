//! # Common Error Types
//!
//! Error type for failures raised before any network call is made. The
//! service and task layers carry `Result<T, String>` directly, since their
//! errors reduce to a single user-facing string.

use thiserror::Error;

/// Errors produced locally by the terminal application.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input validation error: invalid format or a missing required value.
    #[error("Validation error: {0}")]
    Validation(String),
}
