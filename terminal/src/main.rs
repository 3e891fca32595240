//! # Stockdesk Terminal
//!
//! Headless runner: logs in with credentials from the environment, then
//! tails the dashboard state while the feed poller and market tasks run.

use std::sync::Arc;
use terminal::app::App;
use terminal::core::error::AppError;
use terminal::services::api::ApiClient;
use tracing::{error, info};

fn load_credentials() -> Result<(String, String), AppError> {
    let username = std::env::var("STOCKDESK_USERNAME")
        .map_err(|_| AppError::Validation("STOCKDESK_USERNAME must be set".to_string()))?;
    let password = std::env::var("STOCKDESK_PASSWORD")
        .map_err(|_| AppError::Validation("STOCKDESK_PASSWORD must be set".to_string()))?;
    Ok((username, password))
}

fn log_snapshot(app: &App) {
    let state = app.state();
    let state = state.read();

    if let Some(session) = &state.session {
        info!(
            user = %session.username,
            messages = state.feed.messages.len(),
            gainers = state.market.gainers.len(),
            watchlist = state.market.watchlist.len(),
            "Dashboard updated"
        );
    }

    if let Some(latest) = state.feed.messages.first() {
        let when = chrono::DateTime::parse_from_rfc3339(&latest.created_at)
            .map(|t| t.with_timezone(&chrono::Local).format("%H:%M:%S").to_string())
            .unwrap_or_else(|_| latest.created_at.clone());
        info!("[{}] {}: {}", when, latest.username, latest.content);
    }

    if let Some(error) = &state.feed.error {
        error!("Feed: {}", error);
    }
}

#[tokio::main]
async fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let (username, password) = match load_credentials() {
        Ok(credentials) => credentials,
        Err(e) => {
            error!("{}", e);
            return;
        }
    };

    let app = App::new(Arc::new(ApiClient::new()));

    info!("Connecting to backend as {}...", username);
    app.login(username, password);

    loop {
        tokio::select! {
            alive = app.process_next_event() => {
                if !alive {
                    break;
                }
                log_snapshot(&app);
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                break;
            }
        }
    }

    app.logout();
}
