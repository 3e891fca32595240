//! # Authentication Handlers
//!
//! Handlers for login, registration, and logout.

use crate::app::events::AppEvent;
use crate::app::state::{AppState, AuthState, Screen};
use crate::utils::validation::{validate_email, validate_password, validate_username};
use async_channel::Sender;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

/// Handle login submit.
///
/// Login asks for username and password only; there is no email field.
pub(crate) fn handle_login_click(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    username: String,
    password: String,
) {
    if username.is_empty() || password.is_empty() {
        let mut state = state.write();
        if let AuthState::Login { error, .. } = &mut state.auth {
            *error = Some("Username and password required".to_string());
        }
        return;
    }

    let api = state.read().api.clone();

    let tx = event_tx.clone();
    tokio::spawn(async move {
        let result = api.login(username, password).await;
        let _ = tx.send(AppEvent::LoginResult(result)).await;
    });

    let mut state = state.write();
    if let AuthState::Login { error, .. } = &mut state.auth {
        *error = Some("Logging in...".to_string());
    }
}

/// Handle registration submit.
///
/// Every field is validated locally before the API call is attempted.
pub(crate) fn handle_register_click(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    username: String,
    email: String,
    password: String,
) {
    for check in [
        validate_username(&username),
        validate_email(&email),
        validate_password(&password),
    ] {
        if !check.is_valid {
            let mut state = state.write();
            if let AuthState::Register { error, .. } = &mut state.auth {
                *error = check.error;
            }
            return;
        }
    }

    let api = state.read().api.clone();

    let tx = event_tx.clone();
    tokio::spawn(async move {
        let result = api.register(username, email, password).await;
        let _ = tx.send(AppEvent::RegisterResult(result)).await;
    });

    let mut state = state.write();
    if let AuthState::Register { error, .. } = &mut state.auth {
        *error = Some("Creating account...".to_string());
    }
}

/// Switch to the login form
pub(crate) fn handle_switch_to_login(state: Arc<RwLock<AppState>>) {
    let mut state = state.write();
    state.auth = AuthState::login_form();
}

/// Switch to the registration form
pub(crate) fn handle_switch_to_register(state: Arc<RwLock<AppState>>) {
    let mut state = state.write();
    state.auth = AuthState::register_form();
}

/// End the session: stop the feed poller, drop the token, return to login.
pub(crate) fn handle_logout(state: Arc<RwLock<AppState>>) {
    let mut state = state.write();

    state.stop_polling();
    state.session = None;
    state.screen = Screen::Login;
    state.auth = AuthState::login_form();
    state.feed = Default::default();
    state.market = Default::default();

    info!("Logged out");
}
