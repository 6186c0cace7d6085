use super::store::{CacheError, CacheStore};
use async_trait::async_trait;
use dashmap::DashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CacheEntry {
    value_json: String,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// In-process cache backend.
///
/// Expired entries are dropped lazily when read and in bulk by `purge_expired`, which
/// the server calls periodically.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: DashMap<String, CacheEntry>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_local(&self, key: &str) -> Option<String> {
        let now = Instant::now();

        if let Some(entry) = self.entries.get(key)
            && !entry.is_expired(now)
        {
            return Some(entry.value_json.clone());
        }

        self.entries.remove_if(key, |_, entry| entry.is_expired(now));
        None
    }

    pub fn store_local(
        &self,
        key: &str,
        value_json: String,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let expires_at = Instant::now()
            .checked_add(ttl)
            .ok_or(CacheError::InvalidTtl(ttl))?;

        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value_json,
                expires_at,
            },
        );
        Ok(())
    }

    /// Drops every expired entry and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        before.saturating_sub(self.entries.len())
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.get_local(key))
    }

    async fn put(&self, key: &str, value_json: String, ttl: Duration) -> Result<(), CacheError> {
        self.store_local(key, value_json, ttl)
    }
}
