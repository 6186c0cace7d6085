use super::store::CacheStore;
use crate::frequency::types::RankedEntry;
use std::sync::Arc;
use std::time::Duration;

/// Typed, fail-open view over a `CacheStore` holding ranked word lists.
pub struct RankingCache {
    store: Arc<dyn CacheStore>,
    ttl: Duration,
}

impl RankingCache {
    pub fn new(store: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the stored ranking, or `None` on a miss, a backend failure or an
    /// undecodable payload.
    pub async fn get(&self, key: &str) -> Option<Vec<RankedEntry>> {
        let value_json = match self.store.get(key).await {
            Ok(Some(value_json)) => value_json,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Cache read failed for {}, computing directly: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str(&value_json) {
            Ok(ranked) => Some(ranked),
            Err(e) => {
                tracing::warn!("Discarding undecodable cache entry {}: {}", key, e);
                None
            }
        }
    }

    /// Stores a ranking for `ttl`. Failures are logged and otherwise ignored.
    pub async fn put(&self, key: &str, ranked: &[RankedEntry]) {
        let value_json = match serde_json::to_string(ranked) {
            Ok(value_json) => value_json,
            Err(e) => {
                tracing::warn!("Failed to serialize ranking for {}: {}", key, e);
                return;
            }
        };

        if let Err(e) = self.store.put(key, value_json, self.ttl).await {
            tracing::warn!("Cache write failed for {}: {}", key, e);
        }
    }
}
