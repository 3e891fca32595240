//! # Market Data Handlers
//!
//! Proxy endpoints over the upstream providers, with a read-through cache
//! for the combined quote + history payload.

use crate::providers::{AlphaVantageClient, FinnhubClient, NewsApiClient};
use crate::quote_cache::QuoteCache;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Duration, Utc};
use rand::Rng;
use serde::Deserialize;
use shared::{
    ErrorResponse, HistoricalPoint, SearchResponse, StockData, SymbolMatch, TopGainer,
};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Days of history returned with a stock payload
const HISTORY_DAYS: usize = 30;
/// Articles returned per news request
const NEWS_LIMIT: usize = 10;
/// Matches returned per search
const SEARCH_LIMIT: usize = 10;
/// Symbols ranked by the top-gainers endpoint
const GAINER_SYMBOLS: [&str; 5] = ["AAPL", "GOOGL", "MSFT", "AMZN", "META"];

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Get quote plus 30-day history for a symbol
pub async fn get_stock(
    State(finnhub): State<Arc<FinnhubClient>>,
    State(alpha_vantage): State<Arc<AlphaVantageClient>>,
    State(cache): State<QuoteCache>,
    Path(symbol): Path<String>,
) -> Result<(StatusCode, Json<StockData>), (StatusCode, Json<ErrorResponse>)> {
    info!("[MARKET] 📊 Stock data request for {}", symbol);

    if let Some(cached) = cache.get(&symbol).await {
        return Ok((StatusCode::OK, Json(cached)));
    }

    let quote = match finnhub.quote(&symbol).await {
        Ok(quote) => quote,
        Err(e) => {
            error!("[MARKET] ❌ Invalid quote data for {}: {}", symbol, e);
            return Err((StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e })));
        }
    };

    // Daily closes from Alpha Vantage; synthesize a series from the current
    // price when the upstream has nothing (rate limit, unknown symbol).
    let historical = match alpha_vantage.daily_closes(&symbol, HISTORY_DAYS).await {
        Ok(Some(points)) => points,
        Ok(None) => {
            info!("[MARKET] Using fallback historical data for {}", symbol);
            fallback_history(quote.current, HISTORY_DAYS)
        }
        Err(e) => {
            warn!("[MARKET] Error fetching historical data: {}", e);
            fallback_history(quote.current, HISTORY_DAYS)
        }
    };

    let data = StockData { quote, historical };
    cache.insert(symbol.clone(), data.clone()).await;

    info!("[MARKET] ✅ Fetched data for {}", symbol);
    Ok((StatusCode::OK, Json(data)))
}

/// Get recent news for a symbol
pub async fn get_stock_news(
    State(finnhub): State<Arc<FinnhubClient>>,
    State(news): State<Arc<NewsApiClient>>,
    Path(symbol): Path<String>,
) -> Result<(StatusCode, Json<Vec<shared::NewsArticle>>), (StatusCode, Json<ErrorResponse>)> {
    info!("[MARKET] 📰 News request for {}", symbol);

    let to = Utc::now();
    let from = to - Duration::days(30);

    let articles = match finnhub
        .company_news(
            &symbol,
            &from.format("%Y-%m-%d").to_string(),
            &to.format("%Y-%m-%d").to_string(),
        )
        .await
    {
        Ok(articles) if !articles.is_empty() => articles,
        Ok(_) | Err(_) => {
            // Fall back to a plain news search when the company feed is dry
            info!("[MARKET] No company news for {}, using NewsAPI", symbol);
            match news.everything(&symbol, NEWS_LIMIT).await {
                Ok(articles) => articles,
                Err(e) => {
                    error!("[MARKET] ❌ NewsAPI error: {}", e);
                    return Err((
                        StatusCode::BAD_REQUEST,
                        Json(ErrorResponse {
                            error: "Failed to fetch news".to_string(),
                        }),
                    ));
                }
            }
        }
    };

    let articles: Vec<_> = articles.into_iter().take(NEWS_LIMIT).collect();
    debug!("[MARKET] Returning {} articles for {}", articles.len(), symbol);
    Ok((StatusCode::OK, Json(articles)))
}

/// Search listings by symbol or free text
pub async fn search_stocks(
    State(finnhub): State<Arc<FinnhubClient>>,
    Query(params): Query<SearchParams>,
) -> Result<(StatusCode, Json<SearchResponse>), (StatusCode, Json<ErrorResponse>)> {
    let query = params.q.to_uppercase();
    info!("[MARKET] 🔍 Symbol search: {:?}", query);

    let mut results: Vec<SymbolMatch> = Vec::new();

    // Direct symbol lookup first: a valid quote means the query is itself
    // a listed symbol.
    match finnhub.quote(&query).await {
        Ok(quote) if quote.current > 0.0 => {
            let description = finnhub
                .company_name(&query)
                .await
                .ok()
                .flatten()
                .unwrap_or_else(|| query.clone());

            results.push(SymbolMatch {
                symbol: query.clone(),
                description,
                display_symbol: query.clone(),
                security_type: "Common Stock".to_string(),
            });
        }
        Ok(_) => {}
        Err(e) => {
            warn!("[MARKET] Failed to get direct quote: {}", e);
        }
    }

    if results.is_empty() {
        match finnhub.symbol_search(&query).await {
            Ok(matches) => results = matches,
            Err(e) => {
                error!("[MARKET] ❌ Search error: {}", e);
                return Err((StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e })));
            }
        }
    }

    rank_matches(&mut results, &query);
    results.truncate(SEARCH_LIMIT);

    Ok((StatusCode::OK, Json(SearchResponse { result: results })))
}

/// Best-performing symbols of the tracked set, sorted by percent change
pub async fn top_gainers(
    State(finnhub): State<Arc<FinnhubClient>>,
) -> Result<(StatusCode, Json<Vec<TopGainer>>), (StatusCode, Json<ErrorResponse>)> {
    info!("[MARKET] 📈 Top gainers request");

    let mut gainers = Vec::new();

    for symbol in GAINER_SYMBOLS {
        match finnhub.quote(symbol).await {
            Ok(quote) => gainers.push(TopGainer {
                symbol: symbol.to_string(),
                price: quote.current,
                change: quote.percent_change,
            }),
            Err(e) => {
                warn!("[MARKET] Skipping {} in gainers: {}", symbol, e);
            }
        }
    }

    sort_gainers(&mut gainers);
    Ok((StatusCode::OK, Json(gainers)))
}

/// Synthesize a daily close series around the current price, newest first.
///
/// Each close varies from the live price by at most ±1%, which keeps the
/// chart plausible without claiming precision the data does not have.
fn fallback_history(current: f64, days: usize) -> Vec<HistoricalPoint> {
    let mut rng = rand::thread_rng();
    let today = Utc::now();

    (0..days)
        .map(|i| {
            let date = today - Duration::days(i as i64);
            let variation = 1.0 + (rng.gen::<f64>() - 0.5) * 0.02;
            HistoricalPoint {
                date: date.format("%Y-%m-%d").to_string(),
                close: (current * variation).to_string(),
            }
        })
        .collect()
}

/// Order search results: exact match, then prefix matches, then the rest.
fn rank_matches(matches: &mut [SymbolMatch], query: &str) {
    matches.sort_by_key(|m| {
        if m.symbol == query {
            0
        } else if m.symbol.starts_with(query) {
            1
        } else {
            2
        }
    });
}

fn sort_gainers(gainers: &mut [TopGainer]) {
    gainers.sort_by(|a, b| b.change.partial_cmp(&a.change).unwrap_or(Ordering::Equal));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_history_shape() {
        let history = fallback_history(100.0, 30);

        assert_eq!(history.len(), 30);
        for point in &history {
            let close: f64 = point.close.parse().unwrap();
            assert!(close >= 99.0 && close <= 101.0, "close {} out of band", close);
            assert_eq!(point.date.len(), 10); // YYYY-MM-DD
        }
    }

    #[test]
    fn test_sort_gainers_descending() {
        let mut gainers = vec![
            TopGainer { symbol: "AAPL".into(), price: 180.0, change: 0.4 },
            TopGainer { symbol: "MSFT".into(), price: 410.0, change: 2.1 },
            TopGainer { symbol: "META".into(), price: 500.0, change: -1.3 },
        ];

        sort_gainers(&mut gainers);

        let order: Vec<_> = gainers.iter().map(|g| g.symbol.as_str()).collect();
        assert_eq!(order, ["MSFT", "AAPL", "META"]);
    }

    #[test]
    fn test_rank_matches_prioritizes_exact_then_prefix() {
        let m = |s: &str| SymbolMatch {
            symbol: s.to_string(),
            description: s.to_string(),
            display_symbol: s.to_string(),
            security_type: "Common Stock".to_string(),
        };
        let mut matches = vec![m("AAPL.SW"), m("ZAAPL"), m("AAPL")];

        rank_matches(&mut matches, "AAPL");

        assert_eq!(matches[0].symbol, "AAPL");
        assert_eq!(matches[1].symbol, "AAPL.SW");
    }
}
