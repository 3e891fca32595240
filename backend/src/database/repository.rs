use super::models::{MessageWithAuthor, Position, Transaction, User};
use super::DbPool;
use sqlx::query_as;

pub struct UserRepository;

impl UserRepository {
    /// Find user by email
    pub async fn find_by_email(pool: &DbPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find user by username
    pub async fn find_by_username(
        pool: &DbPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Find user by id
    pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create a new user
    pub async fn create(
        pool: &DbPool,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO users (username, email, password_hash) VALUES (?, ?, ?)",
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .execute(pool)
        .await?;

        let id = result.last_insert_rowid();

        query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Overwrite the user's cash balance
    pub async fn set_balance(pool: &DbPool, id: i64, balance: f64) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET balance = ? WHERE id = ?")
            .bind(balance)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}

pub struct MessageRepository;

impl MessageRepository {
    /// Most recent messages joined with author usernames, newest first.
    pub async fn list_recent(
        pool: &DbPool,
        limit: i64,
    ) -> Result<Vec<MessageWithAuthor>, sqlx::Error> {
        query_as::<_, MessageWithAuthor>(
            "SELECT m.id, m.content, u.username, m.created_at
             FROM messages m
             JOIN users u ON u.id = m.user_id
             ORDER BY m.created_at DESC, m.id DESC
             LIMIT ?",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Insert a message and return it joined with its author.
    pub async fn create(
        pool: &DbPool,
        user_id: i64,
        content: &str,
    ) -> Result<MessageWithAuthor, sqlx::Error> {
        let result = sqlx::query("INSERT INTO messages (user_id, content) VALUES (?, ?)")
            .bind(user_id)
            .bind(content)
            .execute(pool)
            .await?;

        let id = result.last_insert_rowid();

        query_as::<_, MessageWithAuthor>(
            "SELECT m.id, m.content, u.username, m.created_at
             FROM messages m
             JOIN users u ON u.id = m.user_id
             WHERE m.id = ?",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }
}

pub struct PortfolioRepository;

impl PortfolioRepository {
    /// Find a single position for a user and symbol
    pub async fn find_position(
        pool: &DbPool,
        user_id: i64,
        symbol: &str,
    ) -> Result<Option<Position>, sqlx::Error> {
        query_as::<_, Position>(
            "SELECT * FROM portfolio WHERE user_id = ? AND symbol = ?",
        )
        .bind(user_id)
        .bind(symbol)
        .fetch_optional(pool)
        .await
    }

    /// All positions held by a user
    pub async fn list_for_user(pool: &DbPool, user_id: i64) -> Result<Vec<Position>, sqlx::Error> {
        query_as::<_, Position>("SELECT * FROM portfolio WHERE user_id = ?")
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Add shares to a position, creating it when none exists.
    pub async fn add_shares(
        pool: &DbPool,
        user_id: i64,
        symbol: &str,
        shares: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO portfolio (user_id, symbol, shares)
             VALUES (?, ?, ?)
             ON CONFLICT(user_id, symbol) DO UPDATE SET
                 shares = shares + excluded.shares,
                 updated_at = CURRENT_TIMESTAMP",
        )
        .bind(user_id)
        .bind(symbol)
        .bind(shares)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Remove shares from a position, deleting the row when it reaches zero.
    pub async fn remove_shares(
        pool: &DbPool,
        user_id: i64,
        symbol: &str,
        shares: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE portfolio SET shares = shares - ?, updated_at = CURRENT_TIMESTAMP
             WHERE user_id = ? AND symbol = ?",
        )
        .bind(shares)
        .bind(user_id)
        .bind(symbol)
        .execute(pool)
        .await?;

        sqlx::query("DELETE FROM portfolio WHERE user_id = ? AND symbol = ? AND shares <= 0")
            .bind(user_id)
            .bind(symbol)
            .execute(pool)
            .await?;
        Ok(())
    }
}

pub struct TransactionRepository;

impl TransactionRepository {
    /// Record an executed order
    pub async fn record(
        pool: &DbPool,
        user_id: i64,
        symbol: &str,
        shares: i64,
        price: f64,
        side: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO transactions (user_id, symbol, shares, price, side)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(symbol)
        .bind(shares)
        .bind(price)
        .bind(side)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Order history for a user, newest first
    pub async fn list_for_user(
        pool: &DbPool,
        user_id: i64,
    ) -> Result<Vec<Transaction>, sqlx::Error> {
        query_as::<_, Transaction>(
            "SELECT * FROM transactions WHERE user_id = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
