//! No-op cache implementation for disabled caching.

use super::service::{CacheConnection, CacheService};
use async_trait::async_trait;
use tracing::debug;

/// A cache that is never available.
///
/// Used when no cache backend is configured. Every request goes to the
/// record store and nothing is written back.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn connect(&self) -> Option<Box<dyn CacheConnection>> {
        None
    }

    async fn health_check(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_cache_is_always_absent() {
        let cache = NullCache::new();

        assert!(cache.connect().await.is_none());
        assert!(!cache.health_check().await);
    }
}
