use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub finnhub_api_key: String,
    pub alpha_vantage_api_key: String,
    pub news_api_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:stockdesk.db".to_string());

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| "JWT_SECRET must be set in environment")?;

        let jwt_expiration_hours = env::var("JWT_EXPIRATION_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .map_err(|_| "JWT_EXPIRATION_HOURS must be a valid number")?;

        let finnhub_api_key = env::var("FINNHUB_API_KEY")
            .map_err(|_| "FINNHUB_API_KEY must be set in environment")?;

        let alpha_vantage_api_key = env::var("ALPHA_VANTAGE_API_KEY")
            .map_err(|_| "ALPHA_VANTAGE_API_KEY must be set in environment")?;

        let news_api_key = env::var("NEWS_API_KEY")
            .map_err(|_| "NEWS_API_KEY must be set in environment")?;

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expiration_hours,
            finnhub_api_key,
            alpha_vantage_api_key,
            news_api_key,
        })
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.jwt_secret.len() < 32 {
            return Err("JWT_SECRET must be at least 32 characters long".to_string());
        }

        if self.jwt_expiration_hours < 1 || self.jwt_expiration_hours > 720 {
            return Err("JWT_EXPIRATION_HOURS must be between 1 and 720 (30 days)".to_string());
        }

        if self.finnhub_api_key.is_empty()
            || self.alpha_vantage_api_key.is_empty()
            || self.news_api_key.is_empty()
        {
            return Err("Missing required API keys".to_string());
        }

        Ok(())
    }
}
