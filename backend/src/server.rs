//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! This module provides the main server setup function that creates the Axum
//! router, registers all routes, applies middleware, and starts the HTTP
//! server.

// region: --- Imports
use crate::config::Config;
use crate::database::{create_pool, DbPool};
use crate::error::AppError;
use crate::handlers;
use crate::providers::{AlphaVantageClient, FinnhubClient, NewsApiClient};
use crate::quote_cache::QuoteCache;
use axum::{
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Config,
    pub finnhub: Arc<FinnhubClient>,
    pub alpha_vantage: Arc<AlphaVantageClient>,
    pub news: Arc<NewsApiClient>,
    pub quote_cache: QuoteCache,
}

impl axum::extract::FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl axum::extract::FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<FinnhubClient> {
    fn from_ref(state: &AppState) -> Self {
        state.finnhub.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<AlphaVantageClient> {
    fn from_ref(state: &AppState) -> Self {
        state.alpha_vantage.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<NewsApiClient> {
    fn from_ref(state: &AppState) -> Self {
        state.news.clone()
    }
}

impl axum::extract::FromRef<AppState> for QuoteCache {
    fn from_ref(state: &AppState) -> Self {
        state.quote_cache.clone()
    }
}
// endregion: --- AppState

// region: --- Server Configuration
/// Server configuration
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:5001")
    pub bind_address: String,
    /// Allowed CORS origins
    pub allowed_origins: Vec<String>,
    /// Database migrations path
    pub migrations_path: &'static str,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5001".to_string(),
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
                "http://localhost:3001".to_string(),
                "http://127.0.0.1:3001".to_string(),
            ],
            migrations_path: "./migrations",
        }
    }
}
// endregion: --- Server Configuration

// region: --- Server Setup
/// Initialize and start the HTTP server
///
/// # Errors
///
/// This function will return an error if:
/// - Configuration loading fails
/// - Database connection fails
/// - Database migrations fail
/// - Server binding fails
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global tracing subscriber");

    info!(" STOCKDESK BACKEND STARTING");

    dotenvy::dotenv().ok();

    info!("Loading configuration...");
    let app_config = Config::from_env().map_err(AppError::Config)?;
    app_config.validate().map_err(AppError::Config)?;

    info!("Database URL: {}", app_config.database_url);

    // Ensure data directory exists for SQLite database
    if app_config.database_url.starts_with("sqlite:") {
        let db_path = app_config.database_url.trim_start_matches("sqlite:");
        if let Some(parent) = std::path::Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
                info!("Created database directory: {:?}", parent);
            }
        }
    }

    info!("Connecting to database...");
    let pool = create_pool(&app_config.database_url).await?;

    info!(" Running database migrations from: {}", config.migrations_path);
    let migrator =
        sqlx::migrate::Migrator::new(std::path::Path::new(config.migrations_path)).await?;
    migrator.run(&pool).await?;
    info!(" Migrations complete");

    let state = AppState {
        db: pool,
        finnhub: Arc::new(FinnhubClient::new(app_config.finnhub_api_key.clone())),
        alpha_vantage: Arc::new(AlphaVantageClient::new(
            app_config.alpha_vantage_api_key.clone(),
        )),
        news: Arc::new(NewsApiClient::new(app_config.news_api_key.clone())),
        quote_cache: QuoteCache::new(),
        config: app_config,
    };

    let app = create_router(state, config.allowed_origins.clone());

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;

    info!(" SERVER READY: http://{}", config.bind_address);
    log_server_info();

    axum::serve(listener, app).await?;
    Ok(())
}

/// Create the main application router with all routes
pub fn create_router(state: AppState, allowed_origins: Vec<String>) -> Router {
    use axum::http::{HeaderValue, Method};

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
        ]);

    info!("[ROUTE SETUP] Registering HTTP routes...");
    Router::new()
        .route("/", get(health_check))
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/discussions", get(handlers::discussion::list_messages)
            .post(handlers::discussion::create_message))
        .route("/api/stock/:symbol", get(handlers::market::get_stock))
        .route("/api/stock/:symbol/news", get(handlers::market::get_stock_news))
        .route("/api/search", get(handlers::market::search_stocks))
        .route("/api/market/top-gainers", get(handlers::market::top_gainers))
        .route("/api/trading/balance", get(handlers::trading::get_balance))
        .route("/api/trading/add-funds", post(handlers::trading::add_funds))
        .route("/api/trading/buy", post(handlers::trading::buy_stock))
        .route("/api/trading/sell", post(handlers::trading::sell_stock))
        .route("/api/trading/transactions", get(handlers::trading::get_transactions))
        .fallback(|| async {
            info!("[404 HANDLER] Unmatched route - returning 404");
            (axum::http::StatusCode::NOT_FOUND, "Route not found")
        })
        .with_state(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Log server information
fn log_server_info() {
    info!("MARKET DATA:");
    info!("   • GET  /api/stock/:symbol");
    info!("   • GET  /api/stock/:symbol/news");
    info!("   • GET  /api/search?q={{query}}");
    info!("   • GET  /api/market/top-gainers");
    info!(" DISCUSSION:");
    info!("   • GET  /api/discussions");
    info!("   • POST /api/discussions");
    info!(" TRADING:");
    info!("   • GET  /api/trading/balance");
    info!("   • POST /api/trading/add-funds");
    info!("   • POST /api/trading/buy");
    info!("   • POST /api/trading/sell");
    info!("   • GET  /api/trading/transactions");
    info!(" AUTH:");
    info!("   • POST /api/auth/register");
    info!("   • POST /api/auth/login");
    info!(" HEALTH:");
    info!("   • GET  /");
}
// endregion: --- Server Setup
