//! # Upstream Market Data Providers
//!
//! Thin reqwest wrappers over the third-party APIs the server proxies:
//! Finnhub (quotes, company news, symbol search), Alpha Vantage (daily
//! closes) and NewsAPI (fallback news search).

pub mod alpha_vantage;
pub mod finnhub;
pub mod news;

pub use alpha_vantage::AlphaVantageClient;
pub use finnhub::FinnhubClient;
pub use news::NewsApiClient;
