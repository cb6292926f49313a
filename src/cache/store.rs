//! Cache Store Module
//!
//! Single-owner cache engine combining HashMap storage with recency tracking.
//! Contains no locking of its own; the thread-safe facade lives in `lru`.

use std::collections::HashMap;
use std::hash::Hash;

use tracing::debug;

use crate::cache::{CacheStats, RecencyQueue};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Bounded key-value storage with LRU eviction.
///
/// Two invariants hold after every completed operation:
/// - the key set of the map equals the key set of the recency queue, and
/// - the entry count never exceeds `capacity`.
#[derive(Debug, Clone)]
pub struct CacheStore<K, V> {
    /// Key-value storage
    entries: HashMap<K, V>,
    /// Recency tracker, shares its key set with `entries`
    queue: RecencyQueue<K>,
    /// Hit/miss/eviction counters
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a new empty CacheStore with the given capacity.
    ///
    /// Capacity validation happens in the facade; the engine trusts its input.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            queue: RecencyQueue::new(),
            stats: CacheStats::new(),
            capacity,
        }
    }

    // == Get ==
    /// Retrieves a copy of the value stored under `key` and marks the key as
    /// most recently used.
    ///
    /// Fails with `NotFound` if the key is absent; nothing is mutated in that
    /// case.
    pub fn get(&mut self, key: &K) -> Result<V> {
        if let Some(value) = self.entries.get(key) {
            let value = value.clone();
            self.stats.record_hit();
            self.queue.touch(key.clone());
            Ok(value)
        } else {
            self.stats.record_miss();
            Err(CacheError::NotFound)
        }
    }

    // == Get Or ==
    /// Non-failing counterpart of `get`: returns `default` when the key is
    /// absent, without inserting it.
    pub fn get_or(&mut self, key: &K, default: V) -> V {
        match self.get(key) {
            Ok(value) => value,
            Err(_) => default,
        }
    }

    // == Set ==
    /// Stores a key-value pair and marks the key as most recently used.
    ///
    /// Overwriting an existing key never evicts. Inserting a new key while at
    /// capacity first evicts the least recently used entry, so the capacity
    /// bound holds by construction and the operation cannot fail.
    pub fn set(&mut self, key: K, value: V) {
        if self.entries.contains_key(&key) {
            self.entries.insert(key.clone(), value);
            self.queue.touch(key);
            return;
        }

        if self.entries.len() == self.capacity {
            if let Some(evicted) = self.queue.pop_lru() {
                self.entries.remove(&evicted);
                self.stats.record_eviction();
                debug!(len = self.entries.len(), "evicted least recently used entry");
            }
        }

        self.queue.touch(key.clone());
        self.entries.insert(key, value);
    }

    // == Set If Absent ==
    /// Returns the existing value if the key is present, otherwise stores
    /// `default` and returns it.
    ///
    /// A present key is read without promoting its recency: this operation is
    /// a default-seed, not an access.
    pub fn set_if_absent(&mut self, key: K, default: V) -> V {
        if let Some(existing) = self.entries.get(&key) {
            self.stats.record_hit();
            return existing.clone();
        }
        let value = default.clone();
        self.set(key, default);
        value
    }

    // == Delete ==
    /// Removes an entry from both structures.
    ///
    /// Fails with `NotFound` if the key is absent. Queue removal tolerates a
    /// key that is no longer tracked.
    pub fn delete(&mut self, key: &K) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.queue.remove(key);
            Ok(())
        } else {
            Err(CacheError::NotFound)
        }
    }

    // == Clear ==
    /// Removes all entries. Capacity and counters are preserved.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.queue.clear();
        debug!("cache cleared");
    }

    // == Contains ==
    /// Checks key presence without touching recency or counters.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    // == Items ==
    /// Returns a snapshot of all entries, most recently used first.
    pub fn items(&self) -> Vec<(K, V)> {
        self.queue
            .iter()
            .filter_map(|k| self.entries.get(k).map(|v| (k.clone(), v.clone())))
            .collect()
    }

    // == Keys ==
    /// Returns all keys, most recently used first.
    pub fn keys(&self) -> Vec<K> {
        self.queue.iter().cloned().collect()
    }

    // == Values ==
    /// Returns all values, most recently used first.
    pub fn values(&self) -> Vec<V> {
        self.queue
            .iter()
            .filter_map(|k| self.entries.get(k).cloned())
            .collect()
    }

    // == Entries Oldest First ==
    /// Returns a snapshot of all entries, least recently used first.
    ///
    /// This is the durable ordering: replaying it through `set` reproduces
    /// the exact recency order.
    pub fn entries_oldest_first(&self) -> Vec<(K, V)> {
        let mut entries = self.items();
        entries.reverse();
        entries
    }

    // == Stats ==
    /// Returns current counters with the entry count filled in.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_entries(self.entries.len());
        stats
    }

    // == Capacity ==
    /// Returns the fixed capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Invariant Check (test only) ==
    /// Asserts the structural invariants that must hold after every
    /// completed operation.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self)
    where
        K: std::fmt::Debug,
    {
        use std::collections::HashSet;

        assert!(
            self.entries.len() <= self.capacity,
            "entry count {} exceeds capacity {}",
            self.entries.len(),
            self.capacity
        );

        let map_keys: HashSet<&K> = self.entries.keys().collect();
        let queue_keys: HashSet<&K> = self.queue.iter().collect();
        assert_eq!(map_keys, queue_keys, "map and queue key sets diverged");
        assert_eq!(
            self.queue.len(),
            queue_keys.len(),
            "recency queue holds duplicate keys"
        );
    }
}
