//! Cache Statistics Module
//!
//! Tracks cache performance counters: hits, misses and evictions.

use serde::Serialize;

// == Cache Stats ==
/// Cache performance counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of successful lookups
    pub hits: u64,
    /// Number of failed lookups
    pub misses: u64,
    /// Number of entries evicted by the LRU policy
    pub evictions: u64,
    /// Current number of entries in the cache
    pub entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Eviction ==
    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Update Entry Count ==
    /// Updates the current entry count.
    pub fn set_entries(&mut self, count: usize) {
        self.entries = count;
    }
}
