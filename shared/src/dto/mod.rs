//! # Data Transfer Objects (DTOs)
//!
//! This module contains all data structures used for communication between
//! the terminal client and the backend via the REST API.
//!
//! ## Module Organization
//!
//! - [`auth`] - Registration, login, and account DTOs
//! - [`discussion`] - Discussion board message DTOs
//! - [`market`] - Stock quotes, historical closes, news, search and gainers
//! - [`trading`] - Balance, funds, orders and transaction history
//!
//! ## Serialization Format
//!
//! All DTOs use `serde_json` for JSON serialization:
//!
//! - **Field naming**: snake_case (default serde behavior), with explicit
//!   renames where a provider's wire shape passes through
//! - **All types**: Implement both `Serialize` and `Deserialize`

pub mod auth;
pub mod discussion;
pub mod market;
pub mod trading;

pub use auth::*;
pub use discussion::*;
pub use market::*;
pub use trading::*;
