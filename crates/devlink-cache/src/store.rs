//! Read-through cache store
//!
//! A single `get_or_set` primitive: check the cache, on miss call the fetch
//! function, write the result with a TTL, return it. No negative caching and
//! no stampede protection; concurrent misses on the same key will all call
//! the fetch function.

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::pool::RedisPool;

/// Read-through cache over the shared Redis pool
///
/// Cache failures never fail the read: a Redis error on lookup or store is
/// logged and the fetch result is returned as if the cache did not exist.
#[derive(Clone)]
pub struct CacheStore {
    pool: RedisPool,
}

impl CacheStore {
    /// Create a new cache store
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Get a cached value, or compute and cache it with the given TTL
    pub async fn get_or_set<T, E, F, Fut>(&self, key: &str, ttl_seconds: u64, fetch: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        match self.pool.get_value::<T>(key).await {
            Ok(Some(value)) => {
                debug!(key = %key, "Cache hit");
                return Ok(value);
            }
            Ok(None) => {
                debug!(key = %key, "Cache miss");
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Cache lookup failed, falling back to source");
            }
        }

        let value = fetch().await?;

        if let Err(e) = self.pool.set(key, &value, Some(ttl_seconds)).await {
            warn!(key = %key, error = %e, "Failed to store value in cache");
        }

        Ok(value)
    }

    /// Read a cached value without a fetch fallback
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.pool.get_value::<T>(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, error = %e, "Cache lookup failed");
                None
            }
        }
    }

    /// Remove a single key
    pub async fn evict(&self, key: &str) {
        if let Err(e) = self.pool.delete(key).await {
            warn!(key = %key, error = %e, "Failed to evict cache key");
        }
    }

    /// Access the underlying pool
    pub fn pool(&self) -> &RedisPool {
        &self.pool
    }
}

impl std::fmt::Debug for CacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheStore").finish_non_exhaustive()
    }
}
