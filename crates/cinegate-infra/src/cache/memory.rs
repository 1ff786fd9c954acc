//! In-memory cache implementation - used when Redis is not configured or unreachable.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use cinegate_core::ports::{Cache, CacheError};

struct CacheEntry {
    value: String,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|exp| now >= exp)
    }
}

/// Minimum time between two sweeps of expired entries.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

struct Store {
    entries: HashMap<String, CacheEntry>,
    last_sweep: Instant,
}

impl Store {
    /// Drop every expired entry, at most once per `SWEEP_INTERVAL`.
    ///
    /// Keys that are never read again (one-off search queries) are only
    /// reclaimed here.
    fn sweep(&mut self, now: Instant) {
        if now.duration_since(self.last_sweep) < SWEEP_INTERVAL {
            return;
        }
        let before = self.entries.len();
        self.entries.retain(|_, e| !e.is_expired(now));
        self.last_sweep = now;

        let removed = before - self.entries.len();
        if removed > 0 {
            tracing::debug!(removed, remaining = self.entries.len(), "Swept expired cache entries");
        }
    }
}

/// In-memory cache using a HashMap behind an async RwLock.
///
/// Expiry is measured on the tokio clock. Expired entries are dropped when
/// read, and periodically swept on write. Data is lost on process restart and
/// is not shared between instances.
pub struct InMemoryCache {
    store: RwLock<Store>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store {
                entries: HashMap::new(),
                last_sweep: Instant::now(),
            }),
        }
    }

    /// Number of stored entries, expired ones included until removed.
    pub async fn len(&self) -> usize {
        self.store.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let now = Instant::now();
        {
            let store = self.store.read().await;
            match store.entries.get(key) {
                None => return Ok(None),
                Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.value.clone())),
                Some(_) => {}
            }
        }

        // Re-check under the write lock; a concurrent set may have replaced it.
        let mut store = self.store.write().await;
        if store.entries.get(key).is_some_and(|e| e.is_expired(now)) {
            store.entries.remove(key);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), CacheError> {
        let now = Instant::now();
        let expires_at = ttl.map(|d| now + d);

        let mut store = self.store.write().await;
        store.sweep(now);
        store.entries.insert(
            key.to_string(),
            CacheEntry {
                value: value.to_string(),
                expires_at,
            },
        );

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.write().await.entries.remove(key);
        Ok(())
    }
}
