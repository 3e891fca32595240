//! # Discussion Feed Tasks
//!
//! Async tasks for fetching and posting discussion messages, plus the
//! periodic refresh task that keeps the feed current while a session is
//! active.

use crate::app::events::AppEvent;
use crate::app::state::AppState;
use async_channel::Sender;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::spawn;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::info;

/// The feed refreshes this often while the viewer is authenticated.
pub(crate) const REFRESH_INTERVAL: Duration = Duration::from_secs(10);

/// Fetch the discussion feed.
///
/// Skips silently when no session is active or a fetch is already in
/// flight (prevents task pileup when the server is slow).
pub(crate) fn fetch_messages(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let (api, token) = {
        let mut state = state.write();

        if state.feed.fetching {
            return;
        }
        let token = match state.session.as_ref() {
            Some(session) => session.token.clone(),
            None => return,
        };

        state.feed.fetching = true;
        (state.api.clone(), token)
    }; // Lock released here

    let state_arc = Arc::clone(&state);

    spawn(async move {
        let result = api.get_messages(&token).await;

        {
            let mut state = state_arc.write();
            state.feed.fetching = false;
            // Lock released here automatically
        }

        let _ = event_tx.send(AppEvent::MessagesFetched(result)).await;
    });
}

/// Post a message. The caller has already validated the content.
pub(crate) fn send_message(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    content: String,
) {
    let (api, token) = {
        let state = state.read();
        let Some(session) = state.session.as_ref() else {
            return;
        };
        (state.api.clone(), session.token.clone())
    };

    spawn(async move {
        let result = api.post_message(&token, &content).await;
        let _ = event_tx.send(AppEvent::MessageSent(result)).await;
    });
}

/// Start the periodic feed refresh task.
///
/// The first tick fires immediately, so entering the feed fetches at once.
/// The returned handle is stored in [`AppState::poller`] and aborted on
/// logout or teardown; no request is issued after the abort.
pub(crate) fn start_feed_polling(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    every: Duration,
) -> JoinHandle<()> {
    spawn(async move {
        let mut ticker = interval(every);

        info!("Starting discussion feed refresh (every {:?})", every);

        loop {
            ticker.tick().await;
            fetch_messages(Arc::clone(&state), event_tx.clone());
        }
    })
}
