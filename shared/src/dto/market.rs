//! # Market Data Transfer Objects
//!
//! Quote, historical close, news, symbol search and top-gainer structures.
//!
//! The quote object keeps Finnhub's short wire keys (`c`, `d`, `dp`, ...)
//! so existing dashboard consumers keep working; Rust field names spell the
//! meaning out.

use serde::{Deserialize, Serialize};

/// Real-time quote in Finnhub's wire shape.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Quote {
    /// Current price
    #[serde(rename = "c")]
    pub current: f64,
    /// Absolute change since previous close
    #[serde(rename = "d", default)]
    pub change: f64,
    /// Percent change since previous close
    #[serde(rename = "dp", default)]
    pub percent_change: f64,
    /// Day high
    #[serde(rename = "h", default)]
    pub high: f64,
    /// Day low
    #[serde(rename = "l", default)]
    pub low: f64,
    /// Day open
    #[serde(rename = "o", default)]
    pub open: f64,
    /// Previous close
    #[serde(rename = "pc", default)]
    pub previous_close: f64,
}

/// One daily close in a historical series.
///
/// `close` stays a string because that is how Alpha Vantage delivers it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoricalPoint {
    pub date: String,
    pub close: String,
}

/// Payload of `GET /api/stock/:symbol`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockData {
    pub quote: Quote,
    pub historical: Vec<HistoricalPoint>,
}

/// A news article about a stock, normalized to Finnhub's company-news shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewsArticle {
    pub headline: String,
    pub source: String,
    #[serde(default)]
    pub summary: String,
    pub url: String,
    /// Unix timestamp (seconds) of publication
    #[serde(default)]
    pub datetime: i64,
    #[serde(default)]
    pub image: String,
}

/// One match from symbol search, in Finnhub's wire shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SymbolMatch {
    pub symbol: String,
    pub description: String,
    #[serde(rename = "displaySymbol")]
    pub display_symbol: String,
    #[serde(rename = "type")]
    pub security_type: String,
}

/// Payload of `GET /api/search?q=`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResponse {
    pub result: Vec<SymbolMatch>,
}

/// One entry of `GET /api/market/top-gainers`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopGainer {
    pub symbol: String,
    pub price: f64,
    /// Percent change for the period
    pub change: f64,
}
