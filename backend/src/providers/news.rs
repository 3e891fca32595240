use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use shared::NewsArticle;
use tracing::debug;

const NEWS_API_URL: &str = "https://newsapi.org/v2";

pub struct NewsApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct ArticleSource {
    #[serde(default)]
    name: String,
}

#[derive(Deserialize)]
struct RawArticle {
    source: ArticleSource,
    title: String,
    #[serde(default)]
    description: Option<String>,
    url: String,
    #[serde(rename = "urlToImage", default)]
    url_to_image: Option<String>,
    #[serde(rename = "publishedAt", default)]
    published_at: String,
}

#[derive(Deserialize)]
struct EverythingResponse {
    status: String,
    #[serde(default)]
    articles: Vec<RawArticle>,
    #[serde(default)]
    message: Option<String>,
}

impl NewsApiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url: NEWS_API_URL.to_string(),
            api_key,
        }
    }

    /// Free-text article search, normalized to the company-news shape.
    pub async fn everything(&self, query: &str, limit: usize) -> Result<Vec<NewsArticle>, String> {
        let url = format!(
            "{}/everything?q={}&apiKey={}&language=en&sortBy=publishedAt",
            self.base_url, query, self.api_key
        );

        debug!("Searching news for {:?}", query);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("API error: {}", response.status()));
        }

        let body: EverythingResponse = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))?;

        if body.status != "ok" {
            return Err(body
                .message
                .unwrap_or_else(|| "Failed to fetch news".to_string()));
        }

        let articles = body
            .articles
            .into_iter()
            .take(limit)
            .map(|a| NewsArticle {
                headline: a.title,
                source: a.source.name,
                summary: a.description.unwrap_or_default(),
                url: a.url,
                datetime: DateTime::parse_from_rfc3339(&a.published_at)
                    .map(|t| t.timestamp())
                    .unwrap_or(0),
                image: a.url_to_image.unwrap_or_default(),
            })
            .collect();

        Ok(articles)
    }
}
