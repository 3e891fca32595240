use shared::StockData;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

/// Stock payloads are served from cache for this long before a refetch.
const CACHE_DURATION: Duration = Duration::from_secs(300);

struct CachedStock {
    fetched_at: Instant,
    data: StockData,
}

/// In-memory read-through cache for `GET /api/stock/:symbol` payloads.
///
/// Entries are validated against the TTL on lookup; there is no background
/// refresh, a stale entry is simply replaced by the next fetch.
#[derive(Clone)]
pub struct QuoteCache {
    entries: Arc<RwLock<HashMap<String, CachedStock>>>,
    ttl: Duration,
}

impl QuoteCache {
    pub fn new() -> Self {
        Self::with_ttl(CACHE_DURATION)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Get a cached payload, unless it has expired.
    pub async fn get(&self, symbol: &str) -> Option<StockData> {
        let entries = self.entries.read().await;
        let cached = entries.get(symbol)?;

        if cached.fetched_at.elapsed() < self.ttl {
            debug!("Returning cached data for {}", symbol);
            Some(cached.data.clone())
        } else {
            None
        }
    }

    /// Store a freshly fetched payload.
    pub async fn insert(&self, symbol: String, data: StockData) {
        let mut entries = self.entries.write().await;
        entries.insert(
            symbol,
            CachedStock {
                fetched_at: Instant::now(),
                data,
            },
        );
    }
}

impl Default for QuoteCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Quote;

    fn sample() -> StockData {
        StockData {
            quote: Quote {
                current: 180.5,
                change: 1.2,
                percent_change: 0.67,
                high: 182.0,
                low: 178.9,
                open: 179.0,
                previous_close: 179.3,
            },
            historical: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_hit_within_ttl() {
        let cache = QuoteCache::with_ttl(Duration::from_secs(60));
        cache.insert("AAPL".to_string(), sample()).await;

        let hit = cache.get("AAPL").await;
        assert!(hit.is_some());
        assert_eq!(hit.unwrap().quote.current, 180.5);
    }

    #[tokio::test]
    async fn test_miss_for_unknown_symbol() {
        let cache = QuoteCache::with_ttl(Duration::from_secs(60));
        assert!(cache.get("MSFT").await.is_none());
    }

    #[tokio::test]
    async fn test_expiry() {
        let cache = QuoteCache::with_ttl(Duration::from_millis(10));
        cache.insert("AAPL".to_string(), sample()).await;

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(cache.get("AAPL").await.is_none());
    }
}
