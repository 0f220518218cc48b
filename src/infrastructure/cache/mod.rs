//! Look-aside cache for status reads.
//!
//! Provides the [`CacheService`] / [`CacheConnection`] traits with three implementations:
//! - [`RedisCache`] - Production Redis-backed cache
//! - [`MemoryCache`] - In-process TTL map for single-node runs and tests
//! - [`NullCache`] - Caching disabled

mod memory_cache;
mod null_cache;
mod redis_cache;
mod service;

pub use memory_cache::MemoryCache;
pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheConnection, CacheError, CacheResult, CacheService};

#[cfg(test)]
pub use service::{MockCacheConnection, MockCacheService};
