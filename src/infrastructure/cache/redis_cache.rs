//! Redis-backed cache implementation.

use super::service::{CacheConnection, CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::future::Future;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Redis cache implementation for status snapshots.
///
/// The `ConnectionManager` is established lazily on the first [`CacheService::connect`]
/// and reused afterwards; it reconnects on its own when Redis comes back.
/// A failed first connect is retried on the next request. Every network call
/// is bounded by `timeout`.
pub struct RedisCache {
    client: Client,
    manager: Mutex<Option<ConnectionManager>>,
    timeout: Duration,
    key_prefix: String,
}

impl RedisCache {
    /// Creates the cache client without touching the network.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `timeout` - Upper bound for connect, GET and SET (`CACHE_TIMEOUT_MS`)
    /// - `key_prefix` - Namespace prepended to every key (`CACHE_KEY_PREFIX`)
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Unavailable`] if the URL cannot be parsed.
    pub fn new(
        redis_url: &str,
        timeout: Duration,
        key_prefix: impl Into<String>,
    ) -> CacheResult<Self> {
        let client = Client::open(redis_url).map_err(|e| {
            CacheError::Unavailable(format!("Failed to create Redis client: {}", e))
        })?;

        Ok(Self {
            client,
            manager: Mutex::new(None),
            timeout,
            key_prefix: key_prefix.into(),
        })
    }

    /// Returns the shared connection manager, connecting and PINGing on first use.
    ///
    /// One `timeout` covers both waiting for the slot and the connect itself.
    async fn manager(&self) -> CacheResult<ConnectionManager> {
        bounded(self.timeout, async {
            let mut slot = self.manager.lock().await;
            if let Some(manager) = slot.as_ref() {
                return Ok(manager.clone());
            }

            let manager = ConnectionManager::new(self.client.clone())
                .await
                .map_err(|e| {
                    CacheError::Unavailable(format!("Failed to connect to Redis: {}", e))
                })?;
            let mut probe = manager.clone();
            probe
                .ping::<()>()
                .await
                .map_err(|e| CacheError::Unavailable(format!("Redis PING failed: {}", e)))?;

            info!("✓ Connected to Redis");
            *slot = Some(manager.clone());
            Ok(manager)
        })
        .await
    }

    /// Returns the raw value and remaining TTL in seconds stored under `key`.
    ///
    /// Used by the admin CLI. A TTL of `-1` means no expiry, `-2` a missing key.
    pub async fn inspect(&self, key: &str) -> CacheResult<Option<(Vec<u8>, i64)>> {
        let mut conn = self.manager().await?;
        let key = build_key(&self.key_prefix, key);

        let value = bounded(self.timeout, async {
            conn.get::<_, Option<Vec<u8>>>(&key)
                .await
                .map_err(|e| CacheError::OperationError(e.to_string()))
        })
        .await?;

        let Some(value) = value else {
            return Ok(None);
        };

        let ttl = bounded(self.timeout, async {
            conn.ttl::<_, i64>(&key)
                .await
                .map_err(|e| CacheError::OperationError(e.to_string()))
        })
        .await?;

        Ok(Some((value, ttl)))
    }
}

/// Constructs the full Redis key with namespace prefix.
fn build_key(prefix: &str, key: &str) -> String {
    format!("{}{}", prefix, key)
}

/// Runs a cache future under a deadline.
async fn bounded<T, F>(timeout: Duration, fut: F) -> CacheResult<T>
where
    F: Future<Output = CacheResult<T>>,
{
    tokio::time::timeout(timeout, fut)
        .await
        .map_err(|_| CacheError::Timeout(timeout))?
}

struct RedisConnection {
    conn: ConnectionManager,
    timeout: Duration,
    key_prefix: String,
}

#[async_trait]
impl CacheService for RedisCache {
    async fn connect(&self) -> Option<Box<dyn CacheConnection>> {
        match self.manager().await {
            Ok(conn) => Some(Box::new(RedisConnection {
                conn,
                timeout: self.timeout,
                key_prefix: self.key_prefix.clone(),
            })),
            Err(e) => {
                warn!("Redis unavailable, continuing without cache: {}", e);
                None
            }
        }
    }

    async fn health_check(&self) -> bool {
        let Ok(mut conn) = self.manager().await else {
            return false;
        };
        bounded(self.timeout, async {
            conn.ping::<()>()
                .await
                .map_err(|e| CacheError::OperationError(e.to_string()))
        })
        .await
        .is_ok()
    }
}

#[async_trait]
impl CacheConnection for RedisConnection {
    async fn get(&mut self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        let full_key = build_key(&self.key_prefix, key);
        let conn = &mut self.conn;

        let value = bounded(self.timeout, async {
            conn.get::<_, Option<Vec<u8>>>(&full_key)
                .await
                .map_err(|e| CacheError::OperationError(format!("GET {}: {}", full_key, e)))
        })
        .await?;

        match &value {
            Some(bytes) => debug!("Cache HIT: {} ({} bytes)", full_key, bytes.len()),
            None => debug!("Cache MISS: {}", full_key),
        }
        Ok(value)
    }

    async fn set(&mut self, key: &str, value: &[u8], ttl_seconds: u64) -> CacheResult<()> {
        let full_key = build_key(&self.key_prefix, key);
        let conn = &mut self.conn;

        bounded(self.timeout, async {
            conn.set_ex::<_, _, ()>(&full_key, value, ttl_seconds)
                .await
                .map_err(|e| CacheError::OperationError(format!("SET {}: {}", full_key, e)))
        })
        .await?;

        debug!("Cache SET: {} (TTL: {}s)", full_key, ttl_seconds);
        Ok(())
    }
}
