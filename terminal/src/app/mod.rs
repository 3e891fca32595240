//! # Application Core
//!
//! The [`App`] owns the shared state, the event channel and the public
//! surface the binary (or a future GUI shell) drives.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  App                                                │
//! │  ├─ handlers  - validate input, mutate state,       │
//! │  │             spawn tasks                          │
//! │  ├─ tasks     - async API calls, feed poller        │
//! │  └─ apply_event - applies task results to state     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Every task result flows through the single event channel and is applied
//! to the state under the lock, one event at a time. That serialization is
//! what makes the feed's refresh/send conflict policy deterministic.

pub mod events;
pub mod handlers;
pub mod state;
pub mod tasks;

use async_channel::{Receiver, Sender};
use events::AppEvent;
use parking_lot::RwLock;
use state::{AppState, AuthState, DashboardTab, Screen, Session};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::core::service::ApiService;

pub struct App {
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    event_rx: Receiver<AppEvent>,
}

impl App {
    pub fn new(api: Arc<dyn ApiService>) -> Self {
        let (event_tx, event_rx) = async_channel::unbounded();

        Self {
            state: Arc::new(RwLock::new(AppState::new(api))),
            event_tx,
            event_rx,
        }
    }

    /// Shared handle to the application state.
    pub fn state(&self) -> Arc<RwLock<AppState>> {
        Arc::clone(&self.state)
    }

    // region: --- User actions

    pub fn login(&self, username: String, password: String) {
        handlers::auth::handle_login_click(self.state(), self.event_tx.clone(), username, password);
    }

    pub fn register(&self, username: String, email: String, password: String) {
        handlers::auth::handle_register_click(
            self.state(),
            self.event_tx.clone(),
            username,
            email,
            password,
        );
    }

    pub fn switch_to_login(&self) {
        handlers::auth::handle_switch_to_login(self.state());
    }

    pub fn switch_to_register(&self) {
        handlers::auth::handle_switch_to_register(self.state());
    }

    pub fn logout(&self) {
        handlers::auth::handle_logout(self.state());
    }

    pub fn navigate(&self, screen: Screen) {
        handlers::navigation::handle_navigate(self.state(), screen);
    }

    pub fn select_tab(&self, tab: DashboardTab) {
        handlers::navigation::handle_select_tab(self.state(), tab);
    }

    /// Replace the message draft (keystroke updates from the surface).
    pub fn set_draft(&self, draft: String) {
        self.state.write().feed.draft = draft;
    }

    pub fn send_message(&self) {
        handlers::discussion::handle_send_click(self.state(), self.event_tx.clone());
    }

    pub fn refresh_feed(&self) {
        handlers::discussion::handle_refresh_feed(self.state(), self.event_tx.clone());
    }

    pub fn select_stock(&self, symbol: String) {
        handlers::market::handle_select_stock(self.state(), self.event_tx.clone(), symbol);
    }

    pub fn search(&self, query: String) {
        handlers::market::handle_search(self.state(), self.event_tx.clone(), query);
    }

    pub fn load_gainers(&self) {
        handlers::market::handle_load_gainers(self.state(), self.event_tx.clone());
    }

    pub fn toggle_watchlist(&self, symbol: String) {
        handlers::market::handle_toggle_watchlist(self.state(), symbol);
    }

    pub fn load_balance(&self) {
        handlers::market::handle_load_balance(self.state(), self.event_tx.clone());
    }

    pub fn load_transactions(&self) {
        handlers::market::handle_load_transactions(self.state(), self.event_tx.clone());
    }

    pub fn add_funds(&self, amount: f64) {
        handlers::market::handle_add_funds(self.state(), self.event_tx.clone(), amount);
    }

    pub fn buy(&self, symbol: String, shares: i64) {
        handlers::market::handle_buy(self.state(), self.event_tx.clone(), symbol, shares);
    }

    pub fn sell(&self, symbol: String, shares: i64) {
        handlers::market::handle_sell(self.state(), self.event_tx.clone(), symbol, shares);
    }

    // endregion: --- User actions

    // region: --- Event loop

    /// Wait for the next task result and apply it to the state.
    ///
    /// Returns `false` once the channel is closed.
    pub async fn process_next_event(&self) -> bool {
        match self.event_rx.recv().await {
            Ok(event) => {
                self.apply_event(event);
                true
            }
            Err(_) => false,
        }
    }

    /// Apply every event already queued, without blocking.
    pub fn drain_pending_events(&self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.apply_event(event);
        }
    }

    fn apply_event(&self, event: AppEvent) {
        match event {
            AppEvent::LoginResult(Ok(resp)) => {
                {
                    let mut state = self.state.write();
                    state.session = Some(Session {
                        username: resp.username,
                        email: resp.email,
                        token: resp.token,
                        balance: resp.balance,
                    });
                    state.screen = Screen::Dashboard;
                    state.auth = AuthState::login_form();

                    // One poller per session
                    state.stop_polling();
                    let handle = tasks::discussion::start_feed_polling(
                        self.state(),
                        self.event_tx.clone(),
                        tasks::discussion::REFRESH_INTERVAL,
                    );
                    state.poller = Some(handle);
                }
                tasks::market::fetch_gainers(self.state(), self.event_tx.clone());
            }
            AppEvent::LoginResult(Err(e)) => {
                let mut state = self.state.write();
                if let AuthState::Login { error, .. } = &mut state.auth {
                    *error = Some(e);
                }
            }
            AppEvent::RegisterResult(Ok(resp)) => {
                // Back to the login form; the account exists now
                let mut state = self.state.write();
                state.auth = AuthState::login_form();
                state.auth.set_error(resp.message);
            }
            AppEvent::RegisterResult(Err(e)) => {
                let mut state = self.state.write();
                if let AuthState::Register { error, .. } = &mut state.auth {
                    *error = Some(e);
                }
            }
            AppEvent::MessagesFetched(Ok(messages)) => {
                debug!(count = messages.len(), "Feed refreshed");
                self.state.write().feed.apply_refresh(messages);
            }
            AppEvent::MessagesFetched(Err(e)) => {
                warn!(error = %e, "Feed refresh failed");
                self.state.write().feed.set_fetch_error();
            }
            AppEvent::MessageSent(Ok(message)) => {
                self.state.write().feed.apply_send(message);
            }
            AppEvent::MessageSent(Err(e)) => {
                warn!(error = %e, "Message send failed");
                self.state.write().feed.set_send_error();
            }
            AppEvent::StockResult(Ok(stock)) => {
                let mut state = self.state.write();
                state.market.stock = Some(stock);
                state.market.error = None;
            }
            AppEvent::StockResult(Err(e)) => {
                let mut state = self.state.write();
                state.market.error = Some(e);
            }
            AppEvent::NewsResult(Ok(news)) => {
                self.state.write().market.news = news;
            }
            AppEvent::NewsResult(Err(e)) => {
                warn!(error = %e, "News fetch failed");
            }
            AppEvent::SearchResult(Ok(resp)) => {
                self.state.write().market.search_results = resp.result;
            }
            AppEvent::SearchResult(Err(e)) => {
                warn!(error = %e, "Symbol search failed");
            }
            AppEvent::GainersResult(Ok(gainers)) => {
                self.state.write().market.gainers = gainers;
            }
            AppEvent::GainersResult(Err(e)) => {
                warn!(error = %e, "Top gainers fetch failed");
            }
            AppEvent::BalanceResult(Ok(balance)) => {
                let mut state = self.state.write();
                if let Some(session) = state.session.as_mut() {
                    session.balance = balance.cash_balance;
                }
                state.market.balance = Some(balance);
            }
            AppEvent::BalanceResult(Err(e)) => {
                warn!(error = %e, "Balance fetch failed");
            }
            AppEvent::OrderResult(Ok(resp)) => {
                let mut state = self.state.write();
                if let Some(session) = state.session.as_mut() {
                    session.balance = resp.new_balance;
                }
                state.market.status = Some(resp.message);
            }
            AppEvent::OrderResult(Err(e)) => {
                self.state.write().market.status = Some(e);
            }
            AppEvent::TransactionsResult(Ok(transactions)) => {
                self.state.write().market.transactions = transactions;
            }
            AppEvent::TransactionsResult(Err(e)) => {
                warn!(error = %e, "Transaction history fetch failed");
            }
        }
    }

    // endregion: --- Event loop
}

impl Drop for App {
    fn drop(&mut self) {
        // Teardown mirrors logout: no poll may outlive the app
        self.state.write().stop_polling();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use shared::{
        BalanceResponse, LoginResponse, Message, NewsArticle, OrderResponse, RegisterResponse,
        SearchResponse, StockData, TopGainer, TransactionRecord,
    };
    use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
    use std::time::Duration;

    /// In-memory backend double; counters record every network-shaped call.
    #[derive(Default)]
    struct MockApi {
        login_calls: AtomicUsize,
        register_calls: AtomicUsize,
        fetch_calls: AtomicUsize,
        post_calls: AtomicUsize,
        fail_fetch: AtomicBool,
        fail_post: AtomicBool,
        messages: Mutex<Vec<Message>>,
        next_id: AtomicI64,
    }

    impl MockApi {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                next_id: AtomicI64::new(1),
                ..Default::default()
            })
        }
    }

    #[async_trait]
    impl crate::core::service::ApiService for MockApi {
        async fn login(
            &self,
            username: String,
            _password: String,
        ) -> Result<LoginResponse, String> {
            self.login_calls.fetch_add(1, Ordering::SeqCst);
            Ok(LoginResponse {
                token: "test-token".to_string(),
                email: format!("{}@example.com", username),
                username,
                balance: 0.0,
            })
        }

        async fn register(
            &self,
            _username: String,
            _email: String,
            _password: String,
        ) -> Result<RegisterResponse, String> {
            self.register_calls.fetch_add(1, Ordering::SeqCst);
            Ok(RegisterResponse {
                message: "User created successfully".to_string(),
            })
        }

        async fn get_messages(&self, _token: &str) -> Result<Vec<Message>, String> {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_fetch.load(Ordering::SeqCst) {
                return Err("connection refused".to_string());
            }
            Ok(self.messages.lock().clone())
        }

        async fn post_message(&self, _token: &str, content: &str) -> Result<Message, String> {
            self.post_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_post.load(Ordering::SeqCst) {
                return Err("connection refused".to_string());
            }
            let message = Message {
                id: self.next_id.fetch_add(1, Ordering::SeqCst),
                content: content.to_string(),
                username: "alice".to_string(),
                created_at: "2024-01-01T00:00:00+00:00".to_string(),
            };
            self.messages.lock().insert(0, message.clone());
            Ok(message)
        }

        async fn get_stock(&self, _symbol: &str) -> Result<StockData, String> {
            Err("not available in tests".to_string())
        }

        async fn get_stock_news(&self, _symbol: &str) -> Result<Vec<NewsArticle>, String> {
            Ok(Vec::new())
        }

        async fn search(&self, _query: &str) -> Result<SearchResponse, String> {
            Ok(SearchResponse { result: Vec::new() })
        }

        async fn top_gainers(&self) -> Result<Vec<TopGainer>, String> {
            Ok(Vec::new())
        }

        async fn get_balance(&self, _token: &str) -> Result<BalanceResponse, String> {
            Ok(BalanceResponse {
                cash_balance: 0.0,
                portfolio: Vec::new(),
                total_value: 0.0,
            })
        }

        async fn add_funds(&self, _token: &str, amount: f64) -> Result<OrderResponse, String> {
            Ok(OrderResponse {
                message: "Funds added successfully".to_string(),
                new_balance: amount,
            })
        }

        async fn buy(
            &self,
            _token: &str,
            _symbol: &str,
            _shares: i64,
        ) -> Result<OrderResponse, String> {
            Ok(OrderResponse {
                message: "Stock purchased successfully".to_string(),
                new_balance: 0.0,
            })
        }

        async fn sell(
            &self,
            _token: &str,
            _symbol: &str,
            _shares: i64,
        ) -> Result<OrderResponse, String> {
            Ok(OrderResponse {
                message: "Stock sold successfully".to_string(),
                new_balance: 0.0,
            })
        }

        async fn get_transactions(&self, _token: &str) -> Result<Vec<TransactionRecord>, String> {
            Ok(Vec::new())
        }
    }

    fn session() -> Session {
        Session {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            token: "test-token".to_string(),
            balance: 0.0,
        }
    }

    #[tokio::test]
    async fn test_empty_send_makes_no_network_call() {
        let api = MockApi::new();
        let app = App::new(api.clone());
        app.state().write().session = Some(session());

        for draft in ["", "   ", "\t\n"] {
            app.set_draft(draft.to_string());
            app.send_message();
        }
        // Rejection is synchronous; nothing was spawned
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(api.post_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_send_prepends_one_message_and_clears_draft() {
        let api = MockApi::new();
        let app = App::new(api.clone());
        app.state().write().session = Some(session());

        app.set_draft("hello world".to_string());
        app.send_message();
        assert!(app.process_next_event().await);

        let state = app.state();
        let state = state.read();
        assert_eq!(state.feed.messages.len(), 1);
        assert_eq!(state.feed.messages[0].content, "hello world");
        assert!(state.feed.draft.is_empty());
        assert_eq!(api.post_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_send_keeps_draft_and_sets_error() {
        let api = MockApi::new();
        api.fail_post.store(true, Ordering::SeqCst);
        let app = App::new(api.clone());
        app.state().write().session = Some(session());

        app.set_draft("hello".to_string());
        app.send_message();
        assert!(app.process_next_event().await);

        let state = app.state();
        let state = state.read();
        assert_eq!(state.feed.draft, "hello");
        assert_eq!(state.feed.error.as_deref(), Some("Failed to send message"));
        assert!(state.feed.messages.is_empty());
    }

    #[tokio::test]
    async fn test_failed_fetch_preserves_previous_list() {
        let api = MockApi::new();
        api.fail_fetch.store(true, Ordering::SeqCst);
        let app = App::new(api.clone());
        {
            let state_lock = app.state();
            let mut state = state_lock.write();
            state.session = Some(session());
            state.feed.messages = vec![Message {
                id: 1,
                content: "kept".to_string(),
                username: "alice".to_string(),
                created_at: "2024-01-01T00:00:00+00:00".to_string(),
            }];
        }

        app.refresh_feed();
        assert!(app.process_next_event().await);

        let state = app.state();
        let state = state.read();
        assert_eq!(state.feed.messages.len(), 1);
        assert_eq!(state.feed.messages[0].content, "kept");
        assert_eq!(state.feed.error.as_deref(), Some("Failed to load messages"));
    }

    #[tokio::test]
    async fn test_logout_stops_scheduled_refreshes() {
        let api = MockApi::new();
        let app = App::new(api.clone());
        {
            let state_lock = app.state();
            let mut state = state_lock.write();
            state.session = Some(session());
            let handle = tasks::discussion::start_feed_polling(
                app.state(),
                app.event_tx.clone(),
                Duration::from_millis(10),
            );
            state.poller = Some(handle);
        }

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(api.fetch_calls.load(Ordering::SeqCst) > 0);

        app.logout();
        let after_logout = api.fetch_calls.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(api.fetch_calls.load(Ordering::SeqCst), after_logout);
    }

    #[tokio::test]
    async fn test_register_requires_email_with_at_sign() {
        let api = MockApi::new();
        let app = App::new(api.clone());
        app.switch_to_register();

        app.register(
            "alice".to_string(),
            "not-an-email".to_string(),
            "secret1".to_string(),
        );
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(api.register_calls.load(Ordering::SeqCst), 0);
        let state = app.state();
        let state = state.read();
        match &state.auth {
            AuthState::Register { error, .. } => {
                assert_eq!(error.as_deref(), Some("Invalid email format"));
            }
            other => panic!("expected register form, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_login_needs_no_email() {
        let api = MockApi::new();
        let app = App::new(api.clone());

        app.login("alice".to_string(), "secret1".to_string());
        assert!(app.process_next_event().await);

        assert_eq!(api.login_calls.load(Ordering::SeqCst), 1);
        let state = app.state();
        let authenticated = {
            let state = state.read();
            assert_eq!(state.screen, Screen::Dashboard);
            assert!(state.poller.is_some());
            state.is_authenticated()
        };
        assert!(authenticated);
    }

    #[tokio::test]
    async fn test_unauthenticated_dashboard_redirects_to_login() {
        let api = MockApi::new();
        let app = App::new(api);

        app.navigate(Screen::Dashboard);

        assert_eq!(app.state().read().screen, Screen::Login);
    }
}
