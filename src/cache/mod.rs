//! Result Cache Module
//!
//! Keeps recently computed rankings for a bounded time so identical requests skip
//! recomputation.
//!
//! ## Core Concepts
//! - **Fingerprint**: A deterministic key derived from the request text, `top` and the
//!   exclude list (in the order given).
//! - **Store**: `CacheStore` is the seam to the key-value backend. `MemoryCache` keeps
//!   entries in-process; `RedisCache` talks to an external Redis server.
//! - **Fail-open**: `RankingCache` turns every backend error into a miss (on read) or a
//!   logged no-op (on write). A broken cache slows requests down but never fails them.

pub mod fingerprint;
pub mod memory;
pub mod ranking;
pub mod redis_store;
pub mod store;
