//! Snapshot Module
//!
//! The durable form of a cache: its capacity and entries in recency order.
//! The lock guarding a live cache is process-local machinery and is never
//! part of this state; restoring a snapshot always builds a fresh lock.

use serde::{Deserialize, Serialize};

// == Snapshot ==
/// Point-in-time durable state of a cache.
///
/// `entries` is ordered least- to most-recently-used, so replaying it through
/// `set` reproduces the exact recency order it was captured with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot<K, V> {
    /// Capacity of the cache the snapshot was taken from
    pub capacity: usize,
    /// Entries from least- to most-recently-used
    pub entries: Vec<(K, V)>,
}

impl<K, V> Snapshot<K, V> {
    /// Returns the number of captured entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries were captured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
