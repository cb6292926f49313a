//! Small LRU - a concurrency-safe in-memory LRU cache
//!
//! Provides a bounded key-value map with least-recently-used eviction,
//! recency-ordered iteration and snapshot round-tripping.

pub mod cache;
pub mod error;

pub use cache::{CacheStats, LruCache, Snapshot};
pub use error::{CacheError, Result};
