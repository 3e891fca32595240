//! # Trading Endpoints
//!
//! Authenticated balance, funding and order calls.

use super::client::ApiClient;
use serde::Serialize;
use shared::{
    AddFundsRequest, BalanceResponse, ErrorResponse, OrderRequest, OrderResponse,
    TransactionRecord,
};

async fn get_authed<T: serde::de::DeserializeOwned>(
    client: &ApiClient,
    url: String,
    token: &str,
) -> Result<T, String> {
    let response = client
        .client
        .get(url)
        .bearer_auth(token)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<T>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        let error = response
            .json::<ErrorResponse>()
            .await
            .map_err(|e| format!("Failed to parse error: {}", e))?;
        Err(error.error)
    }
}

async fn post_authed<B: Serialize, T: serde::de::DeserializeOwned>(
    client: &ApiClient,
    url: String,
    token: &str,
    body: &B,
) -> Result<T, String> {
    let response = client
        .client
        .post(url)
        .bearer_auth(token)
        .json(body)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<T>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        let error = response
            .json::<ErrorResponse>()
            .await
            .map_err(|e| format!("Failed to parse error: {}", e))?;
        Err(error.error)
    }
}

/// Cash balance and marked-to-market portfolio.
pub async fn get_balance(client: &ApiClient, token: &str) -> Result<BalanceResponse, String> {
    get_authed(
        client,
        format!("{}/api/trading/balance", client.base_url()),
        token,
    )
    .await
}

/// Credit the cash balance.
pub async fn add_funds(
    client: &ApiClient,
    token: &str,
    amount: f64,
) -> Result<OrderResponse, String> {
    post_authed(
        client,
        format!("{}/api/trading/add-funds", client.base_url()),
        token,
        &AddFundsRequest { amount },
    )
    .await
}

/// Buy shares at market price.
pub async fn buy(
    client: &ApiClient,
    token: &str,
    symbol: &str,
    shares: i64,
) -> Result<OrderResponse, String> {
    post_authed(
        client,
        format!("{}/api/trading/buy", client.base_url()),
        token,
        &OrderRequest {
            symbol: symbol.to_string(),
            shares,
        },
    )
    .await
}

/// Sell shares at market price.
pub async fn sell(
    client: &ApiClient,
    token: &str,
    symbol: &str,
    shares: i64,
) -> Result<OrderResponse, String> {
    post_authed(
        client,
        format!("{}/api/trading/sell", client.base_url()),
        token,
        &OrderRequest {
            symbol: symbol.to_string(),
            shares,
        },
    )
    .await
}

/// Order history, newest first.
pub async fn get_transactions(
    client: &ApiClient,
    token: &str,
) -> Result<Vec<TransactionRecord>, String> {
    get_authed(
        client,
        format!("{}/api/trading/transactions", client.base_url()),
        token,
    )
    .await
}
