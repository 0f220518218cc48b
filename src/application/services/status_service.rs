//! Cache-aside orchestration of status reads.

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::entities::{Sourced, StatusSnapshot, Subsidiary};
use crate::domain::repositories::StatusRepository;
use crate::error::StoreError;
use crate::infrastructure::cache::{CacheConnection, CacheService};

/// Cache key of the aggregate status snapshot.
pub const STATUS_KEY: &str = "api_status_data";

/// Cache key of the full subsidiary list.
pub const SUBSIDIARIES_KEY: &str = "api_subsidiaries_data";

/// Default lifetime of a cached entry in seconds.
pub const DEFAULT_TTL_SECONDS: u64 = 300;

/// Serves status reads from the cache when possible, from the store otherwise.
///
/// # Protocol
///
/// 1. Connect to the cache; if a handle is available, GET the key
/// 2. **Hit**: decode and return it, no store access
/// 3. **Miss / cache absent / undecodable entry**: read the store, SET the
///    encoded result with the fixed TTL, return the store result
/// 4. **Store failure**: report it; nothing is written to the cache
///
/// Cache failures never leave this service. The service keeps no mutable
/// state, so concurrent requests need no locking: two simultaneous misses
/// both read the store and the last SET wins.
pub struct StatusService {
    repository: Arc<dyn StatusRepository>,
    cache: Arc<dyn CacheService>,
    ttl_seconds: u64,
}

impl StatusService {
    /// Creates a new status service.
    pub fn new(
        repository: Arc<dyn StatusRepository>,
        cache: Arc<dyn CacheService>,
        ttl_seconds: u64,
    ) -> Self {
        Self {
            repository,
            cache,
            ttl_seconds,
        }
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    /// Returns the aggregate status snapshot.
    ///
    /// Never fails: a store failure yields an error snapshot
    /// (`status = "error"`) tagged as store-sourced and not cached.
    /// A cache hit has its message rewritten to mark it as cache-sourced.
    pub async fn get_status(&self) -> Sourced<StatusSnapshot> {
        let repository = self.repository.clone();
        let result = self
            .read_through(STATUS_KEY, || async move {
                let data = repository.fetch_summary().await?;
                Ok(StatusSnapshot::from_store(data))
            })
            .await;

        match result {
            Ok(sourced) if sourced.is_cache_hit() => {
                Sourced::cache(sourced.value.mark_cached())
            }
            Ok(sourced) => sourced,
            Err(e) => Sourced::store(StatusSnapshot::error(e)),
        }
    }

    /// Returns every subsidiary, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns the [`StoreError`] when the list is not cached and the store
    /// read fails.
    pub async fn get_subsidiaries(&self) -> Result<Sourced<Vec<Subsidiary>>, StoreError> {
        let repository = self.repository.clone();
        self.read_through(SUBSIDIARIES_KEY, || async move {
            repository.fetch_subsidiaries().await
        })
        .await
    }

    /// Checks the record store.
    ///
    /// # Errors
    ///
    /// Returns the [`StoreError`] raised by the ping query.
    pub async fn check_store(&self) -> Result<(), StoreError> {
        self.repository.ping().await
    }

    /// Checks the cache backend. `false` only degrades performance.
    pub async fn check_cache(&self) -> bool {
        self.cache.health_check().await
    }

    /// Cache-aside read of `key`, falling back to `load` on any miss.
    async fn read_through<T, F, Fut>(
        &self,
        key: &str,
        load: F,
    ) -> Result<Sourced<T>, StoreError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, StoreError>>,
    {
        let mut conn = self.cache.connect().await;

        if let Some(handle) = conn.as_mut() {
            match handle.get(key).await {
                Ok(Some(bytes)) => match serde_json::from_slice::<T>(&bytes) {
                    Ok(value) => {
                        debug!("Cache HIT for {}", key);
                        metrics::counter!("status_cache_hits_total", "key" => key.to_string())
                            .increment(1);
                        return Ok(Sourced::cache(value));
                    }
                    Err(e) => {
                        warn!("Discarding corrupt cache entry {}: {}", key, e);
                        record_miss(key, "corrupt");
                    }
                },
                Ok(None) => {
                    debug!("Cache MISS for {}", key);
                    record_miss(key, "empty");
                }
                Err(e) => {
                    warn!("Cache GET failed for {}, falling back to store: {}", key, e);
                    record_miss(key, "unavailable");
                    conn = None;
                }
            }
        } else {
            record_miss(key, "absent");
        }

        let value = load().await.inspect_err(|e| {
            warn!("Store read for {} failed: {}", key, e);
            metrics::counter!("status_store_errors_total", "key" => key.to_string())
                .increment(1);
        })?;

        if let Some(handle) = conn.as_mut() {
            self.write_back(&mut **handle, key, &value).await;
        }

        Ok(Sourced::store(value))
    }

    /// Stores a freshly loaded value. Failures are logged and dropped.
    async fn write_back<T: Serialize>(
        &self,
        conn: &mut dyn CacheConnection,
        key: &str,
        value: &T,
    ) {
        let bytes = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to encode {} for caching: {}", key, e);
                return;
            }
        };

        if let Err(e) = conn.set(key, &bytes, self.ttl_seconds).await {
            warn!("Failed to cache {}: {}", key, e);
        }
    }
}

fn record_miss(key: &str, reason: &'static str) {
    metrics::counter!(
        "status_cache_misses_total",
        "key" => key.to_string(),
        "reason" => reason
    )
    .increment(1);
}
