//! # Backend API Service Layer
//!
//! One module per endpoint family, all sharing [`client::ApiClient`].

pub mod auth;
pub mod client;
pub mod discussion;
pub mod market;
pub mod trading;

pub use client::ApiClient;
