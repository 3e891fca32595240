//! # Application State Types
//!
//! All state-related types for the client: screens, authentication forms,
//! the session, the discussion feed and the market dashboard.

use crate::core::service::ApiService;
use shared::{BalanceResponse, Message, NewsArticle, StockData, SymbolMatch, TopGainer};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Authentication screen (login/register)
    Login,
    /// Main dashboard with market data and the discussion board
    Dashboard,
}

/// Active tab on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardTab {
    /// Search, quotes, news, top gainers, watchlist and trading panel
    Market,
    /// Discussion board
    Discussion,
}

impl DashboardTab {
    /// Get tab display name
    pub fn title(&self) -> &'static str {
        match self {
            DashboardTab::Market => "Market",
            DashboardTab::Discussion => "Discussion",
        }
    }
}

/// Authentication sub-state
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    /// Login form
    Login {
        username: String,
        password: String,
        error: Option<String>,
    },
    /// Registration form
    Register {
        username: String,
        email: String,
        password: String,
        error: Option<String>,
    },
}

impl AuthState {
    pub fn login_form() -> Self {
        AuthState::Login {
            username: String::new(),
            password: String::new(),
            error: None,
        }
    }

    pub fn register_form() -> Self {
        AuthState::Register {
            username: String::new(),
            email: String::new(),
            password: String::new(),
            error: None,
        }
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        match self {
            AuthState::Login { error, .. } | AuthState::Register { error, .. } => {
                *error = Some(message.into());
            }
        }
    }
}

/// Authenticated session, held for the lifetime of the login.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub username: String,
    pub email: String,
    pub token: String,
    pub balance: f64,
}

/// Discussion feed state.
///
/// The message list mirrors the server: a completed refresh replaces it
/// wholesale, and a completed send prepends the stored message. Both paths
/// run under the state lock, so they never interleave. A send racing a
/// refresh resolves by id: the prepend is skipped when the refresh already
/// delivered the message.
#[derive(Debug, Default)]
pub struct FeedState {
    pub messages: Vec<Message>,
    /// Message being composed
    pub draft: String,
    pub error: Option<String>,
    /// Guards against poll-tick pileup while a fetch is in flight
    pub fetching: bool,
}

impl FeedState {
    /// Server-authoritative refresh: replace the whole list.
    pub fn apply_refresh(&mut self, messages: Vec<Message>) {
        self.messages = messages;
        self.error = None;
    }

    /// A send completed: prepend the stored message unless a refresh
    /// already delivered it, and clear the draft.
    pub fn apply_send(&mut self, message: Message) {
        if !self.messages.iter().any(|m| m.id == message.id) {
            self.messages.insert(0, message);
        }
        self.draft.clear();
        self.error = None;
    }

    /// A fetch failed: keep the current list, surface one error string.
    pub fn set_fetch_error(&mut self) {
        self.error = Some("Failed to load messages".to_string());
    }

    /// A send failed: keep the draft, surface one error string.
    pub fn set_send_error(&mut self) {
        self.error = Some("Failed to send message".to_string());
    }
}

/// Market dashboard state: the selected stock, its news, top gainers,
/// search results, the watchlist and the trading panel.
#[derive(Debug, Default)]
pub struct MarketState {
    pub selected_symbol: Option<String>,
    pub stock: Option<StockData>,
    pub news: Vec<NewsArticle>,
    pub gainers: Vec<TopGainer>,
    pub search_results: Vec<SymbolMatch>,
    /// Client-curated list of tracked symbols
    pub watchlist: Vec<String>,
    pub balance: Option<BalanceResponse>,
    pub transactions: Vec<shared::TransactionRecord>,
    pub error: Option<String>,
    /// Outcome of the last trading action, shown in the panel
    pub status: Option<String>,
}

impl MarketState {
    /// Add or remove a symbol from the watchlist.
    pub fn toggle_watchlist(&mut self, symbol: &str) {
        if let Some(pos) = self.watchlist.iter().position(|s| s == symbol) {
            self.watchlist.remove(pos);
        } else {
            self.watchlist.push(symbol.to_string());
        }
    }
}

/// Root application state behind the state lock.
pub struct AppState {
    pub screen: Screen,
    pub tab: DashboardTab,
    pub auth: AuthState,
    pub session: Option<Session>,
    pub feed: FeedState,
    pub market: MarketState,
    /// Backend service used by spawned tasks
    pub api: Arc<dyn ApiService>,
    /// Handle of the feed poll task; aborted on logout and teardown
    pub poller: Option<JoinHandle<()>>,
}

impl AppState {
    pub fn new(api: Arc<dyn ApiService>) -> Self {
        Self {
            screen: Screen::Login,
            tab: DashboardTab::Market,
            auth: AuthState::login_form(),
            session: None,
            feed: FeedState::default(),
            market: MarketState::default(),
            api,
            poller: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Abort the feed poll task, if one is running.
    pub fn stop_polling(&mut self) {
        if let Some(handle) = self.poller.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(id: i64, content: &str) -> Message {
        Message {
            id,
            content: content.to_string(),
            username: "alice".to_string(),
            created_at: "2024-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_refresh_replaces_list_and_clears_error() {
        let mut feed = FeedState::default();
        feed.messages = vec![msg(1, "old")];
        feed.error = Some("Failed to load messages".to_string());

        feed.apply_refresh(vec![msg(3, "new"), msg(2, "older")]);

        assert_eq!(feed.messages.len(), 2);
        assert_eq!(feed.messages[0].id, 3);
        assert!(feed.error.is_none());
    }

    #[test]
    fn test_send_prepends_and_clears_draft() {
        let mut feed = FeedState::default();
        feed.messages = vec![msg(1, "existing")];
        feed.draft = "hello".to_string();

        feed.apply_send(msg(2, "hello"));

        assert_eq!(feed.messages.len(), 2);
        assert_eq!(feed.messages[0].id, 2);
        assert!(feed.draft.is_empty());
    }

    #[test]
    fn test_send_dedups_against_refresh() {
        let mut feed = FeedState::default();
        // A refresh that raced the send already delivered message 2
        feed.apply_refresh(vec![msg(2, "hello"), msg(1, "existing")]);

        feed.apply_send(msg(2, "hello"));

        assert_eq!(feed.messages.len(), 2);
        assert_eq!(feed.messages[0].id, 2);
    }

    #[test]
    fn test_send_error_keeps_draft() {
        let mut feed = FeedState::default();
        feed.draft = "hello".to_string();

        feed.set_send_error();

        assert_eq!(feed.draft, "hello");
        assert_eq!(feed.error.as_deref(), Some("Failed to send message"));
    }

    #[test]
    fn test_watchlist_toggle() {
        let mut market = MarketState::default();

        market.toggle_watchlist("AAPL");
        market.toggle_watchlist("MSFT");
        assert_eq!(market.watchlist, ["AAPL", "MSFT"]);

        market.toggle_watchlist("AAPL");
        assert_eq!(market.watchlist, ["MSFT"]);
    }
}
