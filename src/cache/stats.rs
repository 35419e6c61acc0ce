//! Cache Statistics Module
//!
//! Per-instance counters surfaced on the admin stats endpoint.

use serde::Serialize;

// == Cache Stats ==
/// Performance counters for a single cache instance.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Fresh entries served without touching the backing store
    pub hits: u64,
    /// Lookups that fell through (absent or expired)
    pub misses: u64,
    /// Entries dropped by the size bound
    pub evictions: u64,
    /// Entries dropped by explicit invalidation
    pub invalidations: u64,
    /// Current number of entries
    pub total_entries: usize,
}

impl CacheStats {
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hit rate over all lookups, or 0.0 when nothing was asked yet.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Counts `dropped` entries removed by one invalidation call.
    pub fn record_invalidations(&mut self, dropped: u64) {
        self.invalidations += dropped;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
