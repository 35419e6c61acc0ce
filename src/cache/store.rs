//! Local Store Module
//!
//! Bounded in-process map from cache key to entry, with age-based validity
//! checks and oldest-first eviction. Every cache instance owns its store
//! exclusively: the users, trips and support-ticket caches never share a
//! map, so cross-category key collisions are structurally impossible.

use std::collections::HashMap;

use crate::cache::{CacheEntry, CacheStats, EvictionOrder};

// == Local Store ==
/// Bounded key-value store with a per-store TTL.
///
/// `max_entries` must be at least one; the cache constructors reject zero
/// before a store is ever built.
#[derive(Debug)]
pub struct LocalStore<T> {
    /// Key to entry
    entries: HashMap<String, CacheEntry<T>>,
    /// Insertion-order tracker driving eviction
    order: EvictionOrder<String>,
    /// Performance counters
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Entry TTL in milliseconds, None = entries never expire
    ttl_ms: Option<u64>,
}

impl<T: Clone> LocalStore<T> {
    /// Creates a store holding at most `max_entries`, each valid for
    /// `ttl_ms` (or forever when None).
    pub fn new(max_entries: usize, ttl_ms: Option<u64>) -> Self {
        Self {
            entries: HashMap::new(),
            order: EvictionOrder::new(),
            stats: CacheStats::new(),
            max_entries,
            ttl_ms,
        }
    }

    // == Get ==
    /// Returns the value for `key` if present and fresh.
    ///
    /// An expired entry is removed and counted as a miss; the caller is
    /// expected to fall through to the backing store.
    pub fn get(&mut self, key: &str) -> Option<T> {
        match self.entries.get(key) {
            Some(entry) if entry.is_fresh(self.ttl_ms) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            Some(_) => {
                self.entries.remove(key);
                self.order.remove(key);
                self.stats.set_total_entries(self.entries.len());
                self.stats.record_miss();
                None
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Insert ==
    /// Stores `value` under `key`, overwriting any previous entry.
    ///
    /// When a new key would push the store past its bound, the oldest
    /// insertions are evicted first until the store is back under it.
    pub fn insert(&mut self, key: String, value: T) {
        let is_overwrite = self.entries.contains_key(&key);

        if !is_overwrite {
            while self.entries.len() >= self.max_entries {
                match self.order.pop_oldest() {
                    Some(oldest) => {
                        self.entries.remove(&oldest);
                        self.stats.record_eviction();
                    }
                    None => break,
                }
            }
        }

        self.entries.insert(key.clone(), CacheEntry::new(value));
        self.order.record(&key);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Remove ==
    /// Removes one entry; returns true when it existed.
    pub fn remove(&mut self, key: &str) -> bool {
        let existed = self.entries.remove(key).is_some();
        if existed {
            self.order.remove(key);
            self.stats.set_total_entries(self.entries.len());
        }
        existed
    }

    // == Clear ==
    /// Drops every entry, counting them as invalidations.
    pub fn clear(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        self.order.clear();
        self.stats.record_invalidations(dropped as u64);
        self.stats.set_total_entries(0);
        dropped
    }

    // == Evict Expired ==
    /// Removes all expired entries, returning how many were dropped.
    ///
    /// Used by the background sweep so stale pages do not sit in memory
    /// until their key happens to be requested again.
    pub fn evict_expired(&mut self) -> usize {
        if self.ttl_ms.is_none() {
            return 0;
        }

        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| !entry.is_fresh(self.ttl_ms))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.entries.remove(key);
            self.order.remove(key.as_str());
        }

        self.stats.set_total_entries(self.entries.len());
        expired.len()
    }

    // == Stats ==
    /// Returns current counters.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}
