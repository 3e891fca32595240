//! # Handler Tests
//!
//! Test suite for the auth and discussion endpoints, run against an
//! in-memory SQLite pool and the real router.

use crate::auth::{encode_jwt, hash_password};
use crate::config::Config;
use crate::database::repository::UserRepository;
use crate::database::DbPool;
use crate::providers::{AlphaVantageClient, FinnhubClient, NewsApiClient};
use crate::quote_cache::QuoteCache;
use crate::server::{create_router, AppState};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use shared::{ErrorResponse, LoginResponse, Message, RegisterResponse};
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tower::ServiceExt;

/// Setup test database with schema
async fn setup_test_db() -> DbPool {
    // One connection: each `:memory:` connection is its own database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            balance REAL NOT NULL DEFAULT 0,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(&pool)
    .await
    .expect("Failed to create users table");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS messages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id),
            content TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(&pool)
    .await
    .expect("Failed to create messages table");

    pool
}

/// Create test config
fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test-secret-key-must-be-at-least-32-characters-long!".to_string(),
        jwt_expiration_hours: 24,
        finnhub_api_key: "test-finnhub-key".to_string(),
        alpha_vantage_api_key: "test-alpha-key".to_string(),
        news_api_key: "test-news-key".to_string(),
    }
}

/// Create test app with the real route table
fn test_app(pool: DbPool, config: Config) -> Router {
    let state = AppState {
        db: pool,
        finnhub: Arc::new(FinnhubClient::new(config.finnhub_api_key.clone())),
        alpha_vantage: Arc::new(AlphaVantageClient::new(
            config.alpha_vantage_api_key.clone(),
        )),
        news: Arc::new(NewsApiClient::new(config.news_api_key.clone())),
        quote_cache: QuoteCache::new(),
        config,
    };

    create_router(state, Vec::new())
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn bearer_request(method: &str, uri: &str, token: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token));

    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Create a user directly and mint a token for it.
async fn seed_user(pool: &DbPool, config: &Config, username: &str) -> (i64, String) {
    let hash = hash_password("Password123").expect("hashing should succeed in test");
    let email = format!("{}@example.com", username);
    let user = UserRepository::create(pool, username, &email, &hash)
        .await
        .expect("user creation should succeed in test");
    let token = encode_jwt(
        user.id,
        user.username.clone(),
        &config.jwt_secret,
        config.jwt_expiration_hours,
    )
    .expect("token encoding should succeed in test");
    (user.id, token)
}

#[tokio::test]
async fn test_register_success() {
    let pool = setup_test_db().await;
    let app = test_app(pool, test_config());

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            serde_json::json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "Password123"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: RegisterResponse = read_json(response).await;
    assert_eq!(body.message, "User created successfully");
}

#[tokio::test]
async fn test_register_rejects_short_username() {
    let pool = setup_test_db().await;
    let app = test_app(pool, test_config());

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            serde_json::json!({
                "username": "ab",
                "email": "ab@example.com",
                "password": "Password123"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_rejects_invalid_email() {
    let pool = setup_test_db().await;
    let app = test_app(pool, test_config());

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            serde_json::json!({
                "username": "alice",
                "email": "not-an-email",
                "password": "Password123"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = read_json(response).await;
    assert_eq!(body.error, "Invalid email format");
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let pool = setup_test_db().await;
    let config = test_config();
    seed_user(&pool, &config, "alice").await;
    let app = test_app(pool, config);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            serde_json::json!({
                "username": "alice",
                "email": "other@example.com",
                "password": "Password123"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = read_json(response).await;
    assert_eq!(body.error, "Username already exists");
}

#[tokio::test]
async fn test_login_success() {
    let pool = setup_test_db().await;
    let config = test_config();
    seed_user(&pool, &config, "alice").await;
    let app = test_app(pool, config);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            serde_json::json!({ "username": "alice", "password": "Password123" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: LoginResponse = read_json(response).await;
    assert_eq!(body.username, "alice");
    assert_eq!(body.email, "alice@example.com");
    assert!(!body.token.is_empty());
    assert_eq!(body.balance, 0.0);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let pool = setup_test_db().await;
    let config = test_config();
    seed_user(&pool, &config, "alice").await;
    let app = test_app(pool, config);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            serde_json::json!({ "username": "alice", "password": "WrongPassword" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: ErrorResponse = read_json(response).await;
    assert_eq!(body.error, "Invalid username or password");
}

#[tokio::test]
async fn test_login_unknown_user() {
    let pool = setup_test_db().await;
    let app = test_app(pool, test_config());

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            serde_json::json!({ "username": "nobody", "password": "Password123" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_discussions_require_token() {
    let pool = setup_test_db().await;
    let app = test_app(pool, test_config());

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/discussions")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: ErrorResponse = read_json(response).await;
    assert_eq!(body.error, "Token is missing");
}

#[tokio::test]
async fn test_discussions_reject_bad_token() {
    let pool = setup_test_db().await;
    let app = test_app(pool, test_config());

    let response = app
        .oneshot(bearer_request("GET", "/api/discussions", "not-a-jwt", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: ErrorResponse = read_json(response).await;
    assert_eq!(body.error, "Token is invalid");
}

#[tokio::test]
async fn test_post_and_list_messages() {
    let pool = setup_test_db().await;
    let config = test_config();
    let (_, token) = seed_user(&pool, &config, "alice").await;
    let app = test_app(pool, config);

    let response = app
        .clone()
        .oneshot(bearer_request(
            "POST",
            "/api/discussions",
            &token,
            Some(serde_json::json!({ "content": "first post" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Message = read_json(response).await;
    assert_eq!(created.content, "first post");
    assert_eq!(created.username, "alice");

    let response = app
        .clone()
        .oneshot(bearer_request(
            "POST",
            "/api/discussions",
            &token,
            Some(serde_json::json!({ "content": "second post" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(bearer_request("GET", "/api/discussions", &token, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let messages: Vec<Message> = read_json(response).await;
    assert_eq!(messages.len(), 2);
    // Newest first
    assert_eq!(messages[0].content, "second post");
    assert_eq!(messages[1].content, "first post");
}

#[tokio::test]
async fn test_post_rejects_empty_content() {
    let pool = setup_test_db().await;
    let config = test_config();
    let (_, token) = seed_user(&pool, &config, "alice").await;
    let app = test_app(pool, config);

    let response = app
        .oneshot(bearer_request(
            "POST",
            "/api/discussions",
            &token,
            Some(serde_json::json!({ "content": "   " })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = read_json(response).await;
    assert_eq!(body.error, "Message content is required");
}
