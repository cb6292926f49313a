//! Recency Queue Module
//!
//! Tracks key access order for LRU eviction.

use std::collections::VecDeque;

// == Recency Queue ==
/// Tracks access order of cache keys.
///
/// Keys are stored in a VecDeque where:
/// - Front = Most recently used
/// - Back = Least recently used
///
/// The queue never holds duplicate keys. Removal from the middle is linear in
/// the current length, which is fast for small capacities (below roughly a
/// thousand entries) but does not scale beyond that; larger caches should pair
/// the map with an intrusive doubly linked list instead.
#[derive(Debug, Clone)]
pub struct RecencyQueue<K> {
    /// Order of keys by access time
    order: VecDeque<K>,
}

impl<K: PartialEq> RecencyQueue<K> {
    // == Constructor ==
    /// Creates a new empty recency queue.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Touch ==
    /// Marks a key as most recently used (moves to front).
    ///
    /// If the key is already tracked it is removed first, so the queue never
    /// holds duplicates. A new key is simply added at the front.
    pub fn touch(&mut self, key: K) {
        self.remove(&key);
        self.order.push_front(key);
    }

    // == Remove ==
    /// Removes a key from the queue.
    ///
    /// Silently does nothing if the key is not tracked.
    pub fn remove(&mut self, key: &K) {
        self.order.retain(|k| k != key);
    }

    // == Pop LRU ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if the queue is empty.
    pub fn pop_lru(&mut self) -> Option<K> {
        self.order.pop_back()
    }

    // == Peek LRU ==
    /// Returns the least recently used key without removing it.
    pub fn peek_lru(&self) -> Option<&K> {
        self.order.back()
    }

    // == Clear ==
    /// Removes all keys from the queue.
    pub fn clear(&mut self) {
        self.order.clear();
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    pub fn contains(&self, key: &K) -> bool {
        self.order.iter().any(|k| k == key)
    }

    // == Iterate ==
    /// Iterates over the keys from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.order.iter()
    }
}

impl<K: PartialEq> Default for RecencyQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}
