//! Cache Entry Module
//!
//! A single cached value plus its creation timestamp. Freshness is judged
//! against the TTL of the store that owns the entry, so list caches and
//! panel caches can apply different policies to the same entry shape.

use std::time::{SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// A cached payload with its insertion timestamp.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The stored payload
    pub value: T,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
}

impl<T> CacheEntry<T> {
    /// Wraps a value with the current timestamp.
    pub fn new(value: T) -> Self {
        Self {
            value,
            created_at: current_timestamp_ms(),
        }
    }

    /// Age of the entry in milliseconds.
    pub fn age_ms(&self) -> u64 {
        current_timestamp_ms().saturating_sub(self.created_at)
    }

    // == Is Fresh ==
    /// Checks whether the entry is still valid under the given TTL.
    ///
    /// Boundary condition: an entry is stale once its age reaches the TTL,
    /// i.e. it is valid iff `age < ttl`. A store without a TTL never
    /// expires entries; they live until evicted or explicitly invalidated.
    pub fn is_fresh(&self, ttl_ms: Option<u64>) -> bool {
        match ttl_ms {
            Some(ttl) => self.age_ms() < ttl,
            None => true,
        }
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
