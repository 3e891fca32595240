//! # Market Data Endpoints
//!
//! Public (unauthenticated) quote, news, search and gainers calls.

use super::client::ApiClient;
use shared::{ErrorResponse, NewsArticle, SearchResponse, StockData, TopGainer};

async fn get_json<T: serde::de::DeserializeOwned>(
    client: &ApiClient,
    url: String,
) -> Result<T, String> {
    let response = client
        .client
        .get(url)
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

/// Quote plus 30-day history for a symbol.
pub async fn get_stock(client: &ApiClient, symbol: &str) -> Result<StockData, String> {
    get_json(client, format!("{}/api/stock/{}", client.base_url(), symbol)).await
}

/// Recent news for a symbol.
pub async fn get_stock_news(client: &ApiClient, symbol: &str) -> Result<Vec<NewsArticle>, String> {
    get_json(
        client,
        format!("{}/api/stock/{}/news", client.base_url(), symbol),
    )
    .await
}

/// Search listings by symbol or free text.
pub async fn search(client: &ApiClient, query: &str) -> Result<SearchResponse, String> {
    get_json(
        client,
        format!("{}/api/search?q={}", client.base_url(), query),
    )
    .await
}

/// Best performers of the tracked symbol set.
pub async fn top_gainers(client: &ApiClient) -> Result<Vec<TopGainer>, String> {
    get_json(
        client,
        format!("{}/api/market/top-gainers", client.base_url()),
    )
    .await
}
