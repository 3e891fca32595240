//! # Trading Data Transfer Objects
//!
//! Balance, funding, order and transaction-history structures for the
//! paper-trading panel.

use serde::{Deserialize, Serialize};

/// One open position, marked to the current market price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioPosition {
    pub symbol: String,
    pub shares: i64,
    pub current_price: f64,
    pub position_value: f64,
}

/// Payload of `GET /api/trading/balance`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BalanceResponse {
    pub cash_balance: f64,
    pub portfolio: Vec<PortfolioPosition>,
    /// Cash plus the marked-to-market value of every position
    pub total_value: f64,
}

/// Body of `POST /api/trading/add-funds`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AddFundsRequest {
    pub amount: f64,
}

/// Body of `POST /api/trading/buy` and `POST /api/trading/sell`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderRequest {
    pub symbol: String,
    pub shares: i64,
}

/// Response to a funds or order mutation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderResponse {
    pub message: String,
    pub new_balance: f64,
}

/// One row of `GET /api/trading/transactions`, newest first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionRecord {
    pub id: i64,
    pub symbol: String,
    pub shares: i64,
    pub price: f64,
    /// `"buy"` or `"sell"`
    #[serde(rename = "type")]
    pub side: String,
    pub total: f64,
    pub created_at: String,
}
