//! Cache Module
//!
//! Provides a bounded in-memory cache with LRU eviction: a plain single-owner
//! engine (`CacheStore`) and a lock-guarded facade for shared use (`LruCache`).

mod lru;
mod queue;
mod snapshot;
mod stats;
mod store;


// Re-export public types
pub use lru::LruCache;
pub use queue::RecencyQueue;
pub use snapshot::Snapshot;
pub use stats::CacheStats;
pub use store::CacheStore;
