//! Bounded, time-expiring response cache.
//!
//! A thin wrapper over `moka::sync::Cache` configured for least-recently-used
//! eviction plus a fixed time-to-live. Reads and writes are lock-free with
//! respect to each other, so a slow upstream fetch for one key never blocks
//! lookups of another.

use menubridge_core::CacheSettings;
use moka::policy::EvictionPolicy;
use moka::sync::Cache;

/// Key/value store shared by every request handled by one service.
///
/// There is no delete: entries leave only through TTL expiry or capacity
/// pressure.
#[derive(Clone)]
pub struct CacheStore<V> {
    inner: Cache<String, V>,
}

impl<V> CacheStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    #[must_use]
    pub fn new(settings: CacheSettings) -> Self {
        let inner = Cache::builder()
            .max_capacity(settings.max_entries)
            .time_to_live(settings.ttl)
            .eviction_policy(EvictionPolicy::lru())
            .build();
        Self { inner }
    }

    /// Returns the live value for `key`, or `None` if absent or expired.
    pub fn get(&self, key: &str) -> Option<V> {
        self.inner.get(key)
    }

    /// Stores `value` under `key`, replacing any previous entry and
    /// restarting its TTL.
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.inner.insert(key.into(), value);
    }

    /// Number of live entries after applying pending evictions.
    pub fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks();
        self.inner.entry_count()
    }
}
