use reqwest::Client;
use serde::Deserialize;
use shared::{NewsArticle, Quote, SymbolMatch};
use tracing::{debug, error};

const FINNHUB_URL: &str = "https://finnhub.io/api/v1";

pub struct FinnhubClient {
    client: Client,
    base_url: String,
    api_key: String,
}

/// Raw search entry; Finnhub omits `exchange` on some listings.
#[derive(Deserialize)]
struct RawSymbol {
    symbol: String,
    description: String,
    #[serde(rename = "displaySymbol")]
    display_symbol: String,
    #[serde(rename = "type", default)]
    security_type: String,
    #[serde(default)]
    exchange: Option<String>,
}

#[derive(Deserialize)]
struct SearchResults {
    #[serde(default)]
    result: Vec<RawSymbol>,
}

#[derive(Deserialize)]
struct CompanyProfile {
    #[serde(default)]
    name: Option<String>,
}

impl FinnhubClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url: FINNHUB_URL.to_string(),
            api_key,
        }
    }

    /// Get a real-time quote for a symbol
    pub async fn quote(&self, symbol: &str) -> Result<Quote, String> {
        let url = format!(
            "{}/quote?symbol={}&token={}",
            self.base_url, symbol, self.api_key
        );

        debug!("Fetching quote for {}", symbol);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        if !response.status().is_success() {
            error!("Finnhub API error: {}", response.status());
            return Err(format!("API error: {}", response.status()));
        }

        response
            .json::<Quote>()
            .await
            .map_err(|_| "Invalid quote data".to_string())
    }

    /// Company news for a symbol over a date range (YYYY-MM-DD bounds)
    pub async fn company_news(
        &self,
        symbol: &str,
        from: &str,
        to: &str,
    ) -> Result<Vec<NewsArticle>, String> {
        let url = format!(
            "{}/company-news?symbol={}&from={}&to={}&token={}",
            self.base_url, symbol, from, to, self.api_key
        );

        debug!("Fetching company news for {} ({} to {})", symbol, from, to);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("API error: {}", response.status()));
        }

        response
            .json::<Vec<NewsArticle>>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    }

    /// Search listings by free-text query, filtered to NYSE/NASDAQ common stock.
    pub async fn symbol_search(&self, query: &str) -> Result<Vec<SymbolMatch>, String> {
        let url = format!(
            "{}/search?q={}&token={}",
            self.base_url, query, self.api_key
        );

        debug!("Searching symbols for {:?}", query);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("API error: {}", response.status()));
        }

        let results: SearchResults = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))?;

        let matches = results
            .result
            .into_iter()
            .filter(|item| {
                item.security_type == "Common Stock"
                    && item
                        .exchange
                        .as_deref()
                        .map_or(true, |ex| ex.contains("NYSE") || ex.contains("NASDAQ"))
            })
            .map(|item| SymbolMatch {
                symbol: item.symbol,
                description: item.description,
                display_symbol: item.display_symbol,
                security_type: item.security_type,
            })
            .collect();

        Ok(matches)
    }

    /// Company display name, when the profile is available
    pub async fn company_name(&self, symbol: &str) -> Result<Option<String>, String> {
        let url = format!(
            "{}/stock/profile2?symbol={}&token={}",
            self.base_url, symbol, self.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("API error: {}", response.status()));
        }

        let profile: CompanyProfile = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))?;

        Ok(profile.name)
    }
}
