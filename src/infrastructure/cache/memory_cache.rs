//! In-process cache with per-entry expiry.

use super::service::{CacheConnection, CacheResult, CacheService};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone)]
struct Entry {
    value: Vec<u8>,
    expires_at: Instant,
}

type Entries = Arc<Mutex<HashMap<String, Entry>>>;

/// A single-process key-value store with TTL expiry.
///
/// Selected with `CACHE_BACKEND=memory`. Expired entries are dropped lazily on
/// read. Expiry follows the tokio clock, so paused-time tests can advance it.
#[derive(Clone, Default)]
pub struct MemoryCache {
    entries: Entries,
}

impl MemoryCache {
    pub fn new() -> Self {
        debug!("Using MemoryCache (in-process)");
        Self::default()
    }

    /// Returns the number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Writes raw bytes without going through a connection.
    pub fn insert_raw(&self, key: &str, value: &[u8], ttl_seconds: u64) {
        lock(&self.entries).insert(
            key.to_string(),
            Entry {
                value: value.to_vec(),
                expires_at: expiry(ttl_seconds),
            },
        );
    }

    /// Reads raw bytes, ignoring expiry.
    pub fn peek_raw(&self, key: &str) -> Option<Vec<u8>> {
        lock(&self.entries).get(key).map(|e| e.value.clone())
    }
}

// A poisoned lock only means another task panicked mid-insert; the map itself
// is still usable.
fn lock(entries: &Entries) -> MutexGuard<'_, HashMap<String, Entry>> {
    entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct MemoryConnection {
    entries: Entries,
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn connect(&self) -> Option<Box<dyn CacheConnection>> {
        Some(Box::new(MemoryConnection {
            entries: self.entries.clone(),
        }))
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[async_trait]
impl CacheConnection for MemoryConnection {
    async fn get(&mut self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        let mut entries = lock(&self.entries);

        let expired = match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => {
                return Ok(Some(entry.value.clone()));
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            entries.remove(key);
            debug!("Cache EXPIRED: {}", key);
        }
        Ok(None)
    }

    async fn set(&mut self, key: &str, value: &[u8], ttl_seconds: u64) -> CacheResult<()> {
        lock(&self.entries).insert(
            key.to_string(),
            Entry {
                value: value.to_vec(),
                expires_at: expiry(ttl_seconds),
            },
        );
        debug!("Cache SET: {} (TTL: {}s)", key, ttl_seconds);
        Ok(())
    }
}

/// Deadline `ttl_seconds` from now, clamped for TTLs past the clock's range.
fn expiry(ttl_seconds: u64) -> Instant {
    let now = Instant::now();
    now.checked_add(Duration::from_secs(ttl_seconds))
        .unwrap_or_else(|| now + Duration::from_secs(FAR_FUTURE_SECONDS))
}

const FAR_FUTURE_SECONDS: u64 = 30 * 365 * 24 * 60 * 60;
