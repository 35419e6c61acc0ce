//! Eviction Order Module
//!
//! Insertion-order tracking for oldest-first eviction, shared by the page
//! and panel caches.

use std::borrow::Borrow;
use std::collections::VecDeque;

// == Eviction Order ==
/// Tracks insertion order for eviction.
///
/// Keys are stored in a VecDeque where:
/// - Front = most recently inserted
/// - Back = oldest insertion
///
/// Re-inserting an existing key moves it to the front; plain reads do not,
/// so eviction follows insertion age rather than access recency.
#[derive(Debug, Default)]
pub struct EvictionOrder<K> {
    /// Keys ordered by insertion time
    order: VecDeque<K>,
}

impl<K: PartialEq + Clone> EvictionOrder<K> {
    /// Creates a new empty tracker.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Record ==
    /// Marks a key as just inserted (moves to front).
    ///
    /// If the key is already tracked, it is removed first so the queue
    /// never holds duplicates.
    pub fn record(&mut self, key: &K) {
        self.remove(key);
        self.order.push_front(key.clone());
    }

    // == Remove ==
    /// Removes a key from the tracker.
    pub fn remove<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.order.retain(|k| k.borrow() != key);
    }

    // == Retain ==
    /// Keeps only the keys matching the predicate.
    pub fn retain<F: FnMut(&K) -> bool>(&mut self, f: F) {
        self.order.retain(f);
    }

    // == Pop Oldest ==
    /// Returns and removes the oldest-inserted key.
    ///
    /// Returns None if the tracker is empty.
    pub fn pop_oldest(&mut self) -> Option<K> {
        self.order.pop_back()
    }

    /// Returns the oldest-inserted key without removing it.
    pub fn peek_oldest(&self) -> Option<&K> {
        self.order.back()
    }

    // == Clear ==
    /// Drops every tracked key.
    pub fn clear(&mut self) {
        self.order.clear();
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Checks if a key is being tracked.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.order.iter().any(|k| k.borrow() == key)
    }
}
