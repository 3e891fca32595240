use reqwest::Client;
use serde::Deserialize;
use shared::HistoricalPoint;
use std::collections::BTreeMap;
use tracing::debug;

const ALPHA_VANTAGE_URL: &str = "https://www.alphavantage.co";

pub struct AlphaVantageClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct DailyBar {
    #[serde(rename = "4. close")]
    close: String,
}

#[derive(Deserialize)]
struct DailyResponse {
    /// Keyed by date; absent when the API is rate-limited or the symbol is unknown.
    #[serde(rename = "Time Series (Daily)", default)]
    time_series: Option<BTreeMap<String, DailyBar>>,
}

impl AlphaVantageClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url: ALPHA_VANTAGE_URL.to_string(),
            api_key,
        }
    }

    /// Most recent `limit` daily closes for a symbol, newest first.
    ///
    /// Returns `Ok(None)` when the response carries no series, so callers
    /// can fall back to synthetic history.
    pub async fn daily_closes(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<Option<Vec<HistoricalPoint>>, String> {
        let url = format!(
            "{}/query?function=TIME_SERIES_DAILY&symbol={}&apikey={}",
            self.base_url, symbol, self.api_key
        );

        debug!("Fetching daily series for {}", symbol);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("API error: {}", response.status()));
        }

        let daily: DailyResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))?;

        let Some(series) = daily.time_series else {
            return Ok(None);
        };

        // BTreeMap iterates dates ascending; walk from the back for newest first.
        let points = series
            .into_iter()
            .rev()
            .take(limit)
            .map(|(date, bar)| HistoricalPoint {
                date,
                close: bar.close,
            })
            .collect();

        Ok(Some(points))
    }
}
