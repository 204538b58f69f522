//! # devlink-cache
//!
//! Redis caching layer: read-through mirrors of hot read paths, per-entity
//! invalidation lists, and refresh-token session storage.
//!
//! ## Contract
//!
//! The cache is a disposable mirror of the database. Its loss or staleness
//! (bounded by per-namespace TTLs) never affects correctness, only
//! freshness. No write decision ever reads the cache, and cache failures on
//! the read path degrade to the source of truth.
//!
//! Invalidation is manual and enumerable: every write path names the keys it
//! could have made stale by calling one of the per-entity routines in
//! [`invalidation`]. There is no automatic dependency tracking.

pub mod invalidation;
pub mod keys;
pub mod pool;
pub mod session;
pub mod store;

// Re-export pool types
pub use pool::{
    create_shared_pool, RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool,
};

// Re-export cache primitives
pub use invalidation::Invalidation;
pub use store::CacheStore;

// Re-export session types
pub use session::{RefreshTokenData, RefreshTokenStore};
