use super::store::{CacheError, CacheStore};
use async_trait::async_trait;
use redis::Client;
use std::time::Duration;

/// Cache backend stored in Redis, using the server's own key expiry.
///
/// A multiplexed connection is opened per operation, so a Redis restart only costs
/// the requests in flight.
#[derive(Debug, Clone)]
pub struct RedisCache {
    client: Client,
}

impl RedisCache {
    /// Validates the URL. No connection is made until the first operation.
    pub fn open(redis_url: &str) -> Result<Self, CacheError> {
        let client = Client::open(redis_url)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = redis::cmd("GET").arg(key).query_async(&mut conn).await?;
        Ok(value)
    }

    async fn put(&self, key: &str, value_json: String, ttl: Duration) -> Result<(), CacheError> {
        // EX takes whole seconds and rejects 0.
        let seconds = ttl.as_secs();
        if seconds == 0 {
            return Err(CacheError::InvalidTtl(ttl));
        }

        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: () = redis::cmd("SET")
            .arg(key)
            .arg(value_json)
            .arg("EX")
            .arg(seconds)
            .query_async(&mut conn)
            .await?;
        Ok(())
    }
}
