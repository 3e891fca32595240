//! # API Client
//!
//! Main HTTP client for backend API communication.

use crate::core::service::ApiService;
use reqwest::Client;
use shared::{
    BalanceResponse, LoginResponse, Message, NewsArticle, OrderResponse, RegisterResponse,
    SearchResponse, StockData, TopGainer, TransactionRecord,
};

/// Default base URL for the backend API server
const API_BASE_URL: &str = "http://127.0.0.1:5001";

/// HTTP client for communicating with the backend API server.
///
/// This client handles all REST API calls and maintains a connection pool
/// for efficient HTTP/2 multiplexing.
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with default configuration.
    ///
    /// The client is configured with a 10 second timeout to prevent
    /// freezing. The base URL can be overridden with `STOCKDESK_API_URL`.
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        let base_url =
            std::env::var("STOCKDESK_API_URL").unwrap_or_else(|_| API_BASE_URL.to_string());

        Self { client, base_url }
    }

    /// Get the base URL for API requests.
    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

// Implement ApiService trait for ApiClient
#[async_trait::async_trait]
impl ApiService for ApiClient {
    async fn login(&self, username: String, password: String) -> Result<LoginResponse, String> {
        crate::services::api::auth::login(self, username, password).await
    }

    async fn register(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> Result<RegisterResponse, String> {
        crate::services::api::auth::register(self, username, email, password).await
    }

    async fn get_messages(&self, token: &str) -> Result<Vec<Message>, String> {
        crate::services::api::discussion::get_messages(self, token).await
    }

    async fn post_message(&self, token: &str, content: &str) -> Result<Message, String> {
        crate::services::api::discussion::post_message(self, token, content).await
    }

    async fn get_stock(&self, symbol: &str) -> Result<StockData, String> {
        crate::services::api::market::get_stock(self, symbol).await
    }

    async fn get_stock_news(&self, symbol: &str) -> Result<Vec<NewsArticle>, String> {
        crate::services::api::market::get_stock_news(self, symbol).await
    }

    async fn search(&self, query: &str) -> Result<SearchResponse, String> {
        crate::services::api::market::search(self, query).await
    }

    async fn top_gainers(&self) -> Result<Vec<TopGainer>, String> {
        crate::services::api::market::top_gainers(self).await
    }

    async fn get_balance(&self, token: &str) -> Result<BalanceResponse, String> {
        crate::services::api::trading::get_balance(self, token).await
    }

    async fn add_funds(&self, token: &str, amount: f64) -> Result<OrderResponse, String> {
        crate::services::api::trading::add_funds(self, token, amount).await
    }

    async fn buy(&self, token: &str, symbol: &str, shares: i64) -> Result<OrderResponse, String> {
        crate::services::api::trading::buy(self, token, symbol, shares).await
    }

    async fn sell(&self, token: &str, symbol: &str, shares: i64) -> Result<OrderResponse, String> {
        crate::services::api::trading::sell(self, token, symbol, shares).await
    }

    async fn get_transactions(&self, token: &str) -> Result<Vec<TransactionRecord>, String> {
        crate::services::api::trading::get_transactions(self, token).await
    }
}
