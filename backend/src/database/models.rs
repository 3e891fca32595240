use chrono::NaiveDateTime;
use sqlx::FromRow;

/// Account row. `password_hash` never leaves this crate.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub balance: f64,
    pub created_at: NaiveDateTime,
}

/// Discussion message joined with its author's username.
#[derive(Debug, Clone, FromRow)]
pub struct MessageWithAuthor {
    pub id: i64,
    pub content: String,
    pub username: String,
    pub created_at: NaiveDateTime,
}

/// One portfolio position.
#[derive(Debug, Clone, FromRow)]
pub struct Position {
    pub id: i64,
    pub user_id: i64,
    pub symbol: String,
    pub shares: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// One executed order.
#[derive(Debug, Clone, FromRow)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub symbol: String,
    pub shares: i64,
    pub price: f64,
    pub side: String,
    pub created_at: NaiveDateTime,
}
