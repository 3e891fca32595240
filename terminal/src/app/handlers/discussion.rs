//! # Discussion Handlers
//!
//! Sending messages and forcing a feed refresh.

use crate::app::events::AppEvent;
use crate::app::state::AppState;
use crate::app::tasks;
use crate::utils::validation::validate_message;
use async_channel::Sender;
use parking_lot::RwLock;
use std::sync::Arc;

/// Submit the current draft.
///
/// Empty and whitespace-only drafts are rejected locally; no network call
/// is made for them.
pub(crate) fn handle_send_click(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let draft = state.read().feed.draft.clone();

    if !validate_message(&draft).is_valid {
        return;
    }

    tasks::discussion::send_message(state, event_tx, draft);
}

/// Force an immediate feed refresh, outside the regular poll cadence.
pub(crate) fn handle_refresh_feed(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    tasks::discussion::fetch_messages(state, event_tx);
}
