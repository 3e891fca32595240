//! # Service Traits
//!
//! Traits for dependency injection, enabling better testability and
//! modularity. Background tasks talk to the backend exclusively through
//! [`ApiService`], so tests can substitute a mock that never touches the
//! network.

use async_trait::async_trait;
use shared::{
    BalanceResponse, LoginResponse, Message, NewsArticle, OrderResponse, RegisterResponse,
    SearchResponse, StockData, TopGainer, TransactionRecord,
};

/// Trait for backend API operations
#[async_trait]
pub trait ApiService: Send + Sync {
    /// Login with username and password
    async fn login(&self, username: String, password: String) -> Result<LoginResponse, String>;

    /// Register a new account
    async fn register(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> Result<RegisterResponse, String>;

    /// Fetch the discussion feed, newest first
    async fn get_messages(&self, token: &str) -> Result<Vec<Message>, String>;

    /// Post a new discussion message
    async fn post_message(&self, token: &str, content: &str) -> Result<Message, String>;

    /// Quote plus 30-day history for a symbol
    async fn get_stock(&self, symbol: &str) -> Result<StockData, String>;

    /// Recent news for a symbol
    async fn get_stock_news(&self, symbol: &str) -> Result<Vec<NewsArticle>, String>;

    /// Search listings by symbol or free text
    async fn search(&self, query: &str) -> Result<SearchResponse, String>;

    /// Best performers of the tracked symbol set
    async fn top_gainers(&self) -> Result<Vec<TopGainer>, String>;

    /// Cash balance and marked-to-market portfolio
    async fn get_balance(&self, token: &str) -> Result<BalanceResponse, String>;

    /// Credit the cash balance
    async fn add_funds(&self, token: &str, amount: f64) -> Result<OrderResponse, String>;

    /// Buy shares at market price
    async fn buy(&self, token: &str, symbol: &str, shares: i64) -> Result<OrderResponse, String>;

    /// Sell shares at market price
    async fn sell(&self, token: &str, symbol: &str, shares: i64) -> Result<OrderResponse, String>;

    /// Order history, newest first
    async fn get_transactions(&self, token: &str) -> Result<Vec<TransactionRecord>, String>;
}
