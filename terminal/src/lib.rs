//! # Stockdesk Terminal - Library Root
//!
//! Headless client for the Stockdesk backend: session handling, the
//! authenticated discussion feed with periodic refresh, dashboard state and
//! the HTTP service layer. The binary crate (`main.rs`) drives the same
//! [`app::App`] the tests do.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                terminal (this crate)                 │
//! ├──────────────────────────────────────────────────────┤
//! │  app       - state machine, handlers, async tasks    │
//! │  services  - backend HTTP client (reqwest)           │
//! │  core      - error type and the ApiService trait     │
//! │  utils     - input validation                        │
//! └──────────────────────────────────────────────────────┘
//!                        │ HTTP
//!                        ▼
//!              ┌───────────────────┐
//!              │   Backend API     │
//!              │   (Axum server)   │
//!              └───────────────────┘
//! ```
//!
//! ## Event flow
//!
//! UI-facing handlers validate input and spawn tokio tasks; tasks call the
//! backend through [`core::service::ApiService`] and report back over an
//! `async-channel`; the app loop applies each [`app::events::AppEvent`] to
//! the shared state sequentially. The discussion feed poller is one such
//! task, spawned on login and aborted on logout.

pub mod app;
pub mod core;
pub mod services;
pub mod utils;
