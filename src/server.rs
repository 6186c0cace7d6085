//! Router assembly and background tasks.

use crate::cache::memory::MemoryCache;
use crate::cache::ranking::RankingCache;
use crate::cache::redis_store::RedisCache;
use crate::cache::store::{CacheError, CacheStore};
use crate::config::Config;
use crate::frequency::handlers::{handle_health, handle_word_frequency};
use crate::frequency::protocol::{ENDPOINT_HEALTH, ENDPOINT_WORD_FREQUENCY};
use crate::frequency::request::RequestLimits;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{Extension, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// The cache chosen for this process.
///
/// `memory` is kept separately so the sweeper can purge it; it is `None` when Redis
/// handles expiry.
pub struct CacheSetup {
    pub ranking: Arc<RankingCache>,
    pub memory: Option<Arc<MemoryCache>>,
}

pub fn build_cache(config: &Config) -> Result<CacheSetup, CacheError> {
    match &config.redis_url {
        Some(url) => {
            let store: Arc<dyn CacheStore> = Arc::new(RedisCache::open(url)?);
            Ok(CacheSetup {
                ranking: Arc::new(RankingCache::new(store, config.cache_ttl)),
                memory: None,
            })
        }
        None => {
            let memory = Arc::new(MemoryCache::new());
            Ok(CacheSetup {
                ranking: Arc::new(RankingCache::new(memory.clone(), config.cache_ttl)),
                memory: Some(memory),
            })
        }
    }
}

pub fn router(cache: Arc<RankingCache>, limits: RequestLimits) -> Router {
    Router::new()
        .route(ENDPOINT_WORD_FREQUENCY, post(handle_word_frequency))
        .route(ENDPOINT_HEALTH, get(handle_health))
        .layer(DefaultBodyLimit::max(limits.body_limit()))
        .layer(Extension(cache))
        .layer(Extension(limits))
}

/// Periodically purges expired entries from the in-memory cache.
pub fn spawn_sweeper(cache: Arc<MemoryCache>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);

        loop {
            interval.tick().await;
            let purged = cache.purge_expired();
            if purged > 0 {
                tracing::info!("Cache sweep: purged {} expired entries", purged);
            }
            tracing::info!("Cache sweep: {} live entries", cache.len());
        }
    })
}
