//! # Navigation Handlers
//!
//! Screen and tab switching, with the auth gate on the dashboard.

use crate::app::state::{AppState, DashboardTab, Screen};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// Navigate to a screen. The dashboard requires a session; an
/// unauthenticated attempt redirects to the login screen.
pub(crate) fn handle_navigate(state: Arc<RwLock<AppState>>, screen: Screen) {
    let mut state = state.write();

    if screen == Screen::Dashboard && !state.is_authenticated() {
        debug!("Redirecting unauthenticated viewer to login");
        state.screen = Screen::Login;
        return;
    }

    state.screen = screen;
}

/// Switch the active dashboard tab.
pub(crate) fn handle_select_tab(state: Arc<RwLock<AppState>>, tab: DashboardTab) {
    let mut state = state.write();
    state.tab = tab;
}
