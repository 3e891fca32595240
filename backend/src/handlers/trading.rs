//! # Trading Handlers
//!
//! Paper-trading endpoints: balance, funding, orders and history. All of
//! them require a bearer token; prices come from the live quote feed at
//! execution time.

use super::authenticate;
use crate::{
    config::Config,
    database::{
        repository::{PortfolioRepository, TransactionRepository, UserRepository},
        DbPool,
    },
    providers::FinnhubClient,
};
use axum::{
    extract::{Json, State},
    http::{HeaderMap, StatusCode},
};
use shared::{
    AddFundsRequest, BalanceResponse, ErrorResponse, OrderRequest, OrderResponse,
    PortfolioPosition, TransactionRecord,
};
use std::sync::Arc;
use tracing::{error, info, warn};

fn bad_request(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

fn db_error(e: sqlx::Error) -> (StatusCode, Json<ErrorResponse>) {
    error!("[TRADING] ❌ Database error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "Database error".to_string(),
        }),
    )
}

async fn load_user(
    pool: &DbPool,
    user_id: i64,
) -> Result<crate::database::models::User, (StatusCode, Json<ErrorResponse>)> {
    UserRepository::find_by_id(pool, user_id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: "Token is invalid".to_string(),
                }),
            )
        })
}

/// Cash balance plus every position marked to the current market price
pub async fn get_balance(
    State(pool): State<DbPool>,
    State(config): State<Config>,
    State(finnhub): State<Arc<FinnhubClient>>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<BalanceResponse>), (StatusCode, Json<ErrorResponse>)> {
    let claims = authenticate(&headers, &config)?;
    let user_id = claims.user_id().map_err(|e| bad_request(&e))?;
    let user = load_user(&pool, user_id).await?;

    let positions = PortfolioRepository::list_for_user(&pool, user_id)
        .await
        .map_err(db_error)?;

    let mut portfolio = Vec::with_capacity(positions.len());
    let mut total_value = user.balance;

    for position in positions {
        match finnhub.quote(&position.symbol).await {
            Ok(quote) => {
                let position_value = quote.current * position.shares as f64;
                total_value += position_value;
                portfolio.push(PortfolioPosition {
                    symbol: position.symbol,
                    shares: position.shares,
                    current_price: quote.current,
                    position_value,
                });
            }
            Err(e) => {
                // A dead quote feed should not hide the rest of the portfolio
                error!("[TRADING] Error fetching quote for {}: {}", position.symbol, e);
            }
        }
    }

    Ok((
        StatusCode::OK,
        Json(BalanceResponse {
            cash_balance: user.balance,
            portfolio,
            total_value,
        }),
    ))
}

/// Credit the user's cash balance
pub async fn add_funds(
    State(pool): State<DbPool>,
    State(config): State<Config>,
    headers: HeaderMap,
    Json(req): Json<AddFundsRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), (StatusCode, Json<ErrorResponse>)> {
    let claims = authenticate(&headers, &config)?;
    let user_id = claims.user_id().map_err(|e| bad_request(&e))?;

    if req.amount <= 0.0 {
        return Err(bad_request("Invalid amount"));
    }

    let user = load_user(&pool, user_id).await?;
    let new_balance = user.balance + req.amount;

    UserRepository::set_balance(&pool, user_id, new_balance)
        .await
        .map_err(db_error)?;

    info!("[TRADING] 💵 Funds added for {}: {}", claims.username, req.amount);

    Ok((
        StatusCode::OK,
        Json(OrderResponse {
            message: "Funds added successfully".to_string(),
            new_balance,
        }),
    ))
}

/// Buy shares at the current market price
pub async fn buy_stock(
    State(pool): State<DbPool>,
    State(config): State<Config>,
    State(finnhub): State<Arc<FinnhubClient>>,
    headers: HeaderMap,
    Json(req): Json<OrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), (StatusCode, Json<ErrorResponse>)> {
    let claims = authenticate(&headers, &config)?;
    let user_id = claims.user_id().map_err(|e| bad_request(&e))?;

    if req.symbol.is_empty() || req.shares <= 0 {
        return Err(bad_request("Invalid request parameters"));
    }

    let price = match finnhub.quote(&req.symbol).await {
        Ok(quote) => quote.current,
        Err(e) => {
            error!("[TRADING] ❌ Error processing buy order: {}", e);
            return Err(bad_request("Failed to process purchase"));
        }
    };

    let user = load_user(&pool, user_id).await?;
    let total_cost = price * req.shares as f64;

    if total_cost > user.balance {
        warn!("[TRADING] Insufficient funds for {}", claims.username);
        return Err(bad_request("Insufficient funds"));
    }

    PortfolioRepository::add_shares(&pool, user_id, &req.symbol, req.shares)
        .await
        .map_err(db_error)?;
    TransactionRepository::record(&pool, user_id, &req.symbol, req.shares, price, "buy")
        .await
        .map_err(db_error)?;

    let new_balance = user.balance - total_cost;
    UserRepository::set_balance(&pool, user_id, new_balance)
        .await
        .map_err(db_error)?;

    info!(
        "[TRADING] ✅ {} bought {} {} @ {}",
        claims.username, req.shares, req.symbol, price
    );

    Ok((
        StatusCode::OK,
        Json(OrderResponse {
            message: "Stock purchased successfully".to_string(),
            new_balance,
        }),
    ))
}

/// Sell shares at the current market price
pub async fn sell_stock(
    State(pool): State<DbPool>,
    State(config): State<Config>,
    State(finnhub): State<Arc<FinnhubClient>>,
    headers: HeaderMap,
    Json(req): Json<OrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), (StatusCode, Json<ErrorResponse>)> {
    let claims = authenticate(&headers, &config)?;
    let user_id = claims.user_id().map_err(|e| bad_request(&e))?;

    if req.symbol.is_empty() || req.shares <= 0 {
        return Err(bad_request("Invalid request parameters"));
    }

    let position = PortfolioRepository::find_position(&pool, user_id, &req.symbol)
        .await
        .map_err(db_error)?;

    match position {
        Some(ref position) if position.shares >= req.shares => {}
        _ => {
            warn!("[TRADING] Insufficient shares for {}", claims.username);
            return Err(bad_request("Insufficient shares"));
        }
    }

    let price = match finnhub.quote(&req.symbol).await {
        Ok(quote) => quote.current,
        Err(e) => {
            error!("[TRADING] ❌ Error processing sell order: {}", e);
            return Err(bad_request("Failed to process sale"));
        }
    };

    PortfolioRepository::remove_shares(&pool, user_id, &req.symbol, req.shares)
        .await
        .map_err(db_error)?;
    TransactionRepository::record(&pool, user_id, &req.symbol, req.shares, price, "sell")
        .await
        .map_err(db_error)?;

    let user = load_user(&pool, user_id).await?;
    let new_balance = user.balance + price * req.shares as f64;
    UserRepository::set_balance(&pool, user_id, new_balance)
        .await
        .map_err(db_error)?;

    info!(
        "[TRADING] ✅ {} sold {} {} @ {}",
        claims.username, req.shares, req.symbol, price
    );

    Ok((
        StatusCode::OK,
        Json(OrderResponse {
            message: "Stock sold successfully".to_string(),
            new_balance,
        }),
    ))
}

/// Order history for the authenticated user, newest first
pub async fn get_transactions(
    State(pool): State<DbPool>,
    State(config): State<Config>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<Vec<TransactionRecord>>), (StatusCode, Json<ErrorResponse>)> {
    let claims = authenticate(&headers, &config)?;
    let user_id = claims.user_id().map_err(|e| bad_request(&e))?;

    let rows = TransactionRepository::list_for_user(&pool, user_id)
        .await
        .map_err(db_error)?;

    let records = rows
        .into_iter()
        .map(|t| TransactionRecord {
            id: t.id,
            symbol: t.symbol,
            shares: t.shares,
            price: t.price,
            side: t.side,
            total: t.price * t.shares as f64,
            created_at: t.created_at.and_utc().to_rfc3339(),
        })
        .collect();

    Ok((StatusCode::OK, Json(records)))
}
