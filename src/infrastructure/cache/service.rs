//! Cache service traits and error types.

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

/// Errors that can occur during cache operations.
///
/// None of these ever reach an HTTP client: the status service logs them and
/// degrades to the record store.
#[derive(Debug)]
pub enum CacheError {
    Unavailable(String),
    Timeout(Duration),
    OperationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Unavailable(e) => write!(f, "Cache unavailable: {}", e),
            Self::Timeout(d) => write!(f, "Cache operation timed out after {}ms", d.as_millis()),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Entry point to a look-aside cache backend.
///
/// A missing connection is a normal state: [`CacheService::connect`] returns
/// `None` instead of an error and callers go straight to the record store.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process TTL map
/// - [`crate::infrastructure::cache::NullCache`] - Caching disabled
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Obtains a connection handle, bounded by the backend's connect timeout.
    ///
    /// Returns `None` on timeout, refusal, authentication failure, or when
    /// caching is disabled.
    async fn connect(&self) -> Option<Box<dyn CacheConnection>>;

    /// Checks if the cache backend is reachable.
    ///
    /// Used by the health endpoint; a `false` here never fails a request.
    async fn health_check(&self) -> bool;
}

/// A live handle to the cache, scoped to one request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheConnection: Send {
    /// Reads the raw bytes stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(bytes))` when present and unexpired
    /// - `Ok(None)` when absent or expired
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the backend fails or exceeds its timeout.
    async fn get(&mut self, key: &str) -> CacheResult<Option<Vec<u8>>>;

    /// Stores `value` under `key`, expiring after `ttl_seconds`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the write does not complete. Callers log and
    /// drop it; the read path already has its answer.
    async fn set(&mut self, key: &str, value: &[u8], ttl_seconds: u64) -> CacheResult<()>;
}
