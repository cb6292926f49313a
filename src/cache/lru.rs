//! LRU Cache Module
//!
//! Thread-safe facade over the cache engine. A single coarse mutex serializes
//! every operation that mutates the store or reorders recency; all such
//! operations are linearizable. Length reads bypass the lock entirely.

use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::cache::{CacheStats, CacheStore, Snapshot};
use crate::error::{CacheError, Result};

// == LRU Cache ==
/// A bounded, concurrency-safe key-value cache with LRU eviction.
///
/// All methods take `&self`; share an instance across threads with `Arc`.
/// Returned values and snapshots are independent clones - internal structures
/// never escape the lock.
///
/// `len`/`is_empty` and `contains` are deliberately weak reads: they report a
/// state that may already be stale when the caller acts on it. Observing
/// `contains(k) == true` carries no guarantee that a following `get(k)` will
/// still find `k`.
#[derive(Debug)]
pub struct LruCache<K, V> {
    /// Fixed maximum entry count, validated at construction
    capacity: usize,
    /// Lock-free mirror of the entry count, refreshed after every mutation
    len: AtomicUsize,
    /// The engine; all structural access goes through this lock
    store: Mutex<CacheStore<K, V>>,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// Fails with `InvalidCapacity` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }
        Ok(Self {
            capacity,
            len: AtomicUsize::new(0),
            store: Mutex::new(CacheStore::new(capacity)),
        })
    }

    // == Guard ==
    /// Acquires the lock, recovering from poisoning.
    ///
    /// A panic inside a store operation cannot leave the structures
    /// half-updated between eviction and insert, so the state behind a
    /// poisoned lock is still usable.
    fn guard(&self) -> MutexGuard<'_, CacheStore<K, V>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Refreshes the lock-free length mirror while still holding the guard.
    fn sync_len(&self, store: &CacheStore<K, V>) {
        self.len.store(store.len(), Ordering::Relaxed);
    }

    // == Get ==
    /// Retrieves a copy of the value stored under `key` and marks the key as
    /// most recently used.
    ///
    /// Fails with `NotFound` if the key is absent.
    pub fn get(&self, key: &K) -> Result<V> {
        self.guard().get(key)
    }

    // == Get Or ==
    /// Non-failing counterpart of `get`: returns `default` when the key is
    /// absent, without inserting it. A present key is promoted as with `get`.
    pub fn get_or(&self, key: &K, default: V) -> V {
        self.guard().get_or(key, default)
    }

    // == Set ==
    /// Stores a key-value pair and marks the key as most recently used.
    ///
    /// Inserting a new key while full evicts the least recently used entry;
    /// overwriting an existing key never evicts.
    pub fn set(&self, key: K, value: V) {
        let mut store = self.guard();
        store.set(key, value);
        self.sync_len(&store);
    }

    // == Set If Absent ==
    /// Returns the existing value if the key is present (without promoting
    /// its recency), otherwise stores `default` and returns it.
    pub fn set_if_absent(&self, key: K, default: V) -> V {
        let mut store = self.guard();
        let value = store.set_if_absent(key, default);
        self.sync_len(&store);
        value
    }

    // == Delete ==
    /// Removes an entry. Fails with `NotFound` if the key is absent.
    pub fn delete(&self, key: &K) -> Result<()> {
        let mut store = self.guard();
        let result = store.delete(key);
        self.sync_len(&store);
        result
    }

    // == Clear ==
    /// Removes all entries atomically. Capacity is preserved.
    pub fn clear(&self) {
        let mut store = self.guard();
        store.clear();
        self.sync_len(&store);
    }

    // == Contains ==
    /// Checks key presence without promoting recency.
    ///
    /// Advisory only: the answer may be stale as soon as it is returned.
    pub fn contains(&self, key: &K) -> bool {
        self.guard().contains(key)
    }

    // == Items ==
    /// Returns a consistent snapshot of all entries, most recently used
    /// first.
    pub fn items(&self) -> Vec<(K, V)> {
        self.guard().items()
    }

    // == Keys ==
    /// Returns all keys, most recently used first.
    pub fn keys(&self) -> Vec<K> {
        self.guard().keys()
    }

    // == Values ==
    /// Returns all values, most recently used first.
    pub fn values(&self) -> Vec<V> {
        self.guard().values()
    }

    // == Iterate ==
    /// Iterates over a snapshot of the keys, most recently used first.
    pub fn iter(&self) -> std::vec::IntoIter<K> {
        self.keys().into_iter()
    }

    /// Iterates over a snapshot of the keys, least recently used first.
    pub fn iter_oldest_first(&self) -> std::vec::IntoIter<K> {
        let mut keys = self.keys();
        keys.reverse();
        keys.into_iter()
    }

    // == Snapshot ==
    /// Captures the durable state: capacity plus entries from least- to
    /// most-recently-used. The lock is not part of the snapshot.
    pub fn snapshot(&self) -> Snapshot<K, V> {
        Snapshot {
            capacity: self.capacity,
            entries: self.guard().entries_oldest_first(),
        }
    }

    // == From Snapshot ==
    /// Rebuilds a cache from a snapshot with a fresh, independent lock.
    ///
    /// Entries are replayed in captured order, so the recency order is
    /// reproduced exactly. Fails with `InvalidCapacity` if the snapshot
    /// declares a zero capacity; a snapshot holding more entries than its
    /// capacity is cut down to the most recent ones by ordinary eviction.
    pub fn from_snapshot(snapshot: Snapshot<K, V>) -> Result<Self> {
        if snapshot.capacity == 0 {
            return Err(CacheError::InvalidCapacity(snapshot.capacity));
        }
        let mut store = CacheStore::new(snapshot.capacity);
        for (key, value) in snapshot.entries {
            store.set(key, value);
        }
        Ok(Self {
            capacity: snapshot.capacity,
            len: AtomicUsize::new(store.len()),
            store: Mutex::new(store),
        })
    }

    // == Stats ==
    /// Returns current cache counters.
    pub fn stats(&self) -> CacheStats {
        self.guard().stats()
    }

    // == Capacity ==
    /// Returns the fixed capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Length ==
    /// Returns the current number of entries without taking the lock.
    ///
    /// Weak read: relaxed load of a mirror counter, not synchronized with
    /// concurrent guarded mutations.
    pub fn len(&self) -> usize {
        self.len.load(Ordering::Relaxed)
    }

    // == Is Empty ==
    /// Returns true if the cache is empty. Same weak-read caveat as `len`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // == Invariant Check (test only) ==
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self)
    where
        K: std::fmt::Debug,
    {
        let store = self.guard();
        store.assert_invariants();
        assert_eq!(self.len.load(Ordering::Relaxed), store.len());
    }
}

// == Clone ==
/// Deep copy with a fresh lock: the source is locked only long enough to
/// read a consistent snapshot, and mutating either instance afterwards is
/// never observable in the other.
impl<K, V> Clone for LruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        let entries = self.guard().entries_oldest_first();
        let mut store = CacheStore::new(self.capacity);
        for (key, value) in entries {
            store.set(key, value);
        }
        Self {
            capacity: self.capacity,
            len: AtomicUsize::new(store.len()),
            store: Mutex::new(store),
        }
    }
}
