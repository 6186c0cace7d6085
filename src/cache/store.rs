use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Default lifetime of a cached ranking.
pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend unavailable: {0}")]
    Unavailable(#[from] redis::RedisError),
    #[error("ttl {0:?} cannot be represented by the backend")]
    InvalidTtl(Duration),
}

/// A key-value store with per-entry expiry.
///
/// Values are opaque JSON strings. Implementations must never return an entry whose
/// ttl has elapsed.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    async fn put(&self, key: &str, value_json: String, ttl: Duration) -> Result<(), CacheError>;
}
