//! # Market Handlers
//!
//! Stock selection, search, watchlist and the trading panel.

use crate::app::events::AppEvent;
use crate::app::state::AppState;
use crate::app::tasks;
use crate::app::tasks::market::OrderKind;
use async_channel::Sender;
use parking_lot::RwLock;
use std::sync::Arc;

/// Select a stock: loads its quote/history and news together.
pub(crate) fn handle_select_stock(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    symbol: String,
) {
    let symbol = symbol.to_uppercase();
    {
        let mut state = state.write();
        state.market.selected_symbol = Some(symbol.clone());
        state.market.error = None;
    }

    tasks::market::fetch_stock(Arc::clone(&state), event_tx.clone(), symbol.clone());
    tasks::market::fetch_news(state, event_tx, symbol);
}

/// Run a symbol search.
pub(crate) fn handle_search(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    query: String,
) {
    if query.trim().is_empty() {
        return;
    }
    tasks::market::search_symbols(state, event_tx, query);
}

/// Refresh the top gainers list.
pub(crate) fn handle_load_gainers(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    tasks::market::fetch_gainers(state, event_tx);
}

/// Track or untrack a symbol.
pub(crate) fn handle_toggle_watchlist(state: Arc<RwLock<AppState>>, symbol: String) {
    let mut state = state.write();
    state.market.toggle_watchlist(&symbol);
}

/// Refresh balance and portfolio.
pub(crate) fn handle_load_balance(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    tasks::market::fetch_balance(state, event_tx);
}

/// Refresh the transaction history.
pub(crate) fn handle_load_transactions(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    tasks::market::fetch_transactions(state, event_tx);
}

/// Credit the cash balance.
pub(crate) fn handle_add_funds(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    amount: f64,
) {
    if amount <= 0.0 {
        let mut state = state.write();
        state.market.status = Some("Invalid amount".to_string());
        return;
    }
    tasks::market::add_funds(state, event_tx, amount);
}

/// Submit a buy order.
pub(crate) fn handle_buy(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    symbol: String,
    shares: i64,
) {
    submit_order(state, event_tx, OrderKind::Buy, symbol, shares);
}

/// Submit a sell order.
pub(crate) fn handle_sell(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    symbol: String,
    shares: i64,
) {
    submit_order(state, event_tx, OrderKind::Sell, symbol, shares);
}

fn submit_order(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    kind: OrderKind,
    symbol: String,
    shares: i64,
) {
    if symbol.trim().is_empty() || shares <= 0 {
        let mut state = state.write();
        state.market.status = Some("Invalid order".to_string());
        return;
    }
    tasks::market::submit_order(state, event_tx, kind, symbol.to_uppercase(), shares);
}
