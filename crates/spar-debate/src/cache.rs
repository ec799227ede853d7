//! In-process TTL cache shared by the response and sentiment paths
//!
//! Backed by Moka with a per-entry expiry policy so each `set` carries its
//! own time-to-live. Expired entries are never returned by [`CacheStore::get`];
//! memory is reclaimed by Moka's maintenance, which [`CacheStore::sweep`]
//! forces and [`CacheStore::spawn_sweeper`] runs periodically.

use moka::future::Cache;
use moka::Expiry;
use serde::{Deserialize, Serialize};
use spar_core::Policy;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

/// Configuration for the cache store
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of live entries
    pub max_entries: u64,
    /// TTL used by [`CacheStore::set_default`]
    pub default_ttl: Duration,
    /// Interval between background sweeps
    pub sweep_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
            default_ttl: Duration::from_secs(3600), // 1 hour
            sweep_interval: Duration::from_secs(600), // 10 minutes
        }
    }
}

/// Values stored by the debate core.
///
/// Responses and sentiment decisions live in the same store under
/// different key purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CachedValue {
    /// Sanitized assistant reply
    Response(String),
    /// Stance/depth decision for a turn
    Policy(Policy),
}

/// The store type the debate core shares between components
pub type DebateCache = CacheStore<CachedValue>;

/// Cache hit/miss counters and live entry count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total > 0 {
            self.hits as f64 / total as f64
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    /// `None` lives until deleted or evicted
    ttl: Option<Duration>,
}

/// Applies each entry's own TTL, restarting it when the key is overwritten
struct PerEntryTtl;

impl<V> Expiry<String, CacheEntry<V>> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        entry: &CacheEntry<V>,
        _created_at: Instant,
    ) -> Option<Duration> {
        entry.ttl
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &CacheEntry<V>,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        entry.ttl
    }
}

/// Generic TTL key-value store.
///
/// Per-key operations are safe under concurrent access. There is no
/// read-modify-write atomicity: concurrent writers of one key race and the
/// last one wins.
pub struct CacheStore<V: Clone + Send + Sync + 'static> {
    cache: Cache<String, CacheEntry<V>>,
    config: CacheConfig,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<V: Clone + Send + Sync + 'static> std::fmt::Debug for CacheStore<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheStore")
            .field("config", &self.config)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

impl<V: Clone + Send + Sync + 'static> CacheStore<V> {
    /// Create a store with the given configuration
    pub fn new(config: CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_entries)
            .expire_after(PerEntryTtl)
            .build();

        tracing::info!(max_entries = config.max_entries, "Cache store initialized");

        Self {
            cache,
            config,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Store `value` under `key` for `ttl_secs` seconds (0 = no expiry).
    ///
    /// Returns `false` if the entry was rejected.
    pub async fn set(&self, key: &str, value: V, ttl_secs: u64) -> bool {
        if key.is_empty() {
            tracing::warn!("Rejected cache write with empty key");
            return false;
        }

        let ttl = (ttl_secs > 0).then(|| Duration::from_secs(ttl_secs));
        self.cache
            .insert(key.to_string(), CacheEntry { value, ttl })
            .await;
        tracing::debug!(cache_key = %key, ttl_secs, "Cache item set");
        true
    }

    /// Store `value` under `key` with the configured default TTL
    pub async fn set_default(&self, key: &str, value: V) -> bool {
        self.set(key, value, self.config.default_ttl.as_secs()).await
    }

    /// Fetch a live value. Expired and never-set keys both read as `None`.
    pub async fn get(&self, key: &str) -> Option<V> {
        let value = self.cache.get(key).await.map(|entry| entry.value);
        if value.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        tracing::debug!(cache_key = %key, hit = value.is_some(), "Cache access");
        value
    }

    /// Remove `key`; `true` if a live entry was removed.
    ///
    /// An expired entry that maintenance has not reclaimed yet counts as absent.
    pub async fn delete(&self, key: &str) -> bool {
        let deleted = self.cache.contains_key(key);
        self.cache.invalidate(key).await;
        tracing::debug!(cache_key = %key, deleted, "Cache item deleted");
        deleted
    }

    /// Drop every entry
    pub async fn clear(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        tracing::info!("Cache cleared");
    }

    /// Run pending expiry and eviction work now
    pub async fn sweep(&self) {
        self.cache.run_pending_tasks().await;
    }

    /// Number of live entries after a sweep
    pub async fn len(&self) -> u64 {
        self.sweep().await;
        self.cache.entry_count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Get cache statistics
    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len().await,
        }
    }

    /// Sweep every `config.sweep_interval` until the store is dropped.
    pub fn spawn_sweeper(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let store: Weak<Self> = Arc::downgrade(self);
        let period = self.config.sweep_interval;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(store) = store.upgrade() else {
                    break;
                };
                store.sweep().await;
                tracing::debug!(entries = store.cache.entry_count(), "Cache sweep complete");
            }
        })
    }
}

impl<V: Clone + Send + Sync + 'static> Default for CacheStore<V> {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
