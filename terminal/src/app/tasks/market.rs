//! # Market Data Tasks
//!
//! Async tasks for quotes, news, search, gainers and the trading panel.

use crate::app::events::AppEvent;
use crate::app::state::AppState;
use async_channel::Sender;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::spawn;
use tracing::debug;

/// Fetch quote and history for a symbol.
pub(crate) fn fetch_stock(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    symbol: String,
) {
    let api = state.read().api.clone();

    spawn(async move {
        let start = std::time::Instant::now();
        let result = api.get_stock(&symbol).await;
        debug!(
            symbol = %symbol,
            duration_ms = start.elapsed().as_millis(),
            ok = result.is_ok(),
            "Stock fetch finished"
        );
        let _ = event_tx.send(AppEvent::StockResult(result)).await;
    });
}

/// Fetch recent news for a symbol.
pub(crate) fn fetch_news(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    symbol: String,
) {
    let api = state.read().api.clone();

    spawn(async move {
        let result = api.get_stock_news(&symbol).await;
        let _ = event_tx.send(AppEvent::NewsResult(result)).await;
    });
}

/// Run a symbol search.
pub(crate) fn search_symbols(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    query: String,
) {
    let api = state.read().api.clone();

    spawn(async move {
        let result = api.search(&query).await;
        let _ = event_tx.send(AppEvent::SearchResult(result)).await;
    });
}

/// Fetch the top gainers list.
pub(crate) fn fetch_gainers(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let api = state.read().api.clone();

    spawn(async move {
        let result = api.top_gainers().await;
        let _ = event_tx.send(AppEvent::GainersResult(result)).await;
    });
}

/// Fetch cash balance and portfolio.
pub(crate) fn fetch_balance(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let (api, token) = {
        let state = state.read();
        let Some(session) = state.session.as_ref() else {
            return;
        };
        (state.api.clone(), session.token.clone())
    };

    spawn(async move {
        let result = api.get_balance(&token).await;
        let _ = event_tx.send(AppEvent::BalanceResult(result)).await;
    });
}

/// Fetch the transaction history.
pub(crate) fn fetch_transactions(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let (api, token) = {
        let state = state.read();
        let Some(session) = state.session.as_ref() else {
            return;
        };
        (state.api.clone(), session.token.clone())
    };

    spawn(async move {
        let result = api.get_transactions(&token).await;
        let _ = event_tx.send(AppEvent::TransactionsResult(result)).await;
    });
}

/// Kind of trading mutation to submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OrderKind {
    Buy,
    Sell,
}

/// Submit a buy or sell order.
pub(crate) fn submit_order(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    kind: OrderKind,
    symbol: String,
    shares: i64,
) {
    let (api, token) = {
        let state = state.read();
        let Some(session) = state.session.as_ref() else {
            return;
        };
        (state.api.clone(), session.token.clone())
    };

    spawn(async move {
        let result = match kind {
            OrderKind::Buy => api.buy(&token, &symbol, shares).await,
            OrderKind::Sell => api.sell(&token, &symbol, shares).await,
        };
        let _ = event_tx.send(AppEvent::OrderResult(result)).await;
    });
}

/// Credit the cash balance.
pub(crate) fn add_funds(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>, amount: f64) {
    let (api, token) = {
        let state = state.read();
        let Some(session) = state.session.as_ref() else {
            return;
        };
        (state.api.clone(), session.token.clone())
    };

    spawn(async move {
        let result = api.add_funds(&token, amount).await;
        let _ = event_tx.send(AppEvent::OrderResult(result)).await;
    });
}
