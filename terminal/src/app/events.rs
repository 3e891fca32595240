//! # Application Events
//!
//! Event types for async task communication between background tasks and the
//! app loop.

use shared::{
    BalanceResponse, LoginResponse, Message, NewsArticle, OrderResponse, RegisterResponse,
    SearchResponse, StockData, TopGainer, TransactionRecord,
};

/// Async task results sent back to the app loop
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Login completed
    LoginResult(Result<LoginResponse, String>),
    /// Registration completed
    RegisterResult(Result<RegisterResponse, String>),
    /// Feed refresh completed
    MessagesFetched(Result<Vec<Message>, String>),
    /// Message send completed
    MessageSent(Result<Message, String>),
    /// Stock payload received
    StockResult(Result<StockData, String>),
    /// News received
    NewsResult(Result<Vec<NewsArticle>, String>),
    /// Symbol search completed
    SearchResult(Result<SearchResponse, String>),
    /// Top gainers received
    GainersResult(Result<Vec<TopGainer>, String>),
    /// Balance and portfolio received
    BalanceResult(Result<BalanceResponse, String>),
    /// Funds or order mutation completed
    OrderResult(Result<OrderResponse, String>),
    /// Transaction history received
    TransactionsResult(Result<Vec<TransactionRecord>, String>),
}
