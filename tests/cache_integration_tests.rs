//! Integration Tests for the LRU Cache
//!
//! Exercises a shared cache from multiple OS threads and round-trips
//! snapshots through JSON.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use small_lru::{CacheError, LruCache, Snapshot};

// == Helper Functions ==

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "small_lru=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

/// Checks everything observable from the outside: capacity bound, unique
/// keys, and agreement between the ordered views.
fn assert_consistent(cache: &LruCache<String, u64>) {
    let items = cache.items();
    let keys = cache.keys();

    assert!(items.len() <= cache.capacity());
    assert_eq!(keys.len(), items.len());

    let unique: HashSet<&String> = keys.iter().collect();
    assert_eq!(unique.len(), keys.len(), "duplicate keys in iteration order");

    for key in &keys {
        assert!(cache.contains(key), "listed key missing from the store");
    }

    let oldest_first: Vec<String> = cache.iter_oldest_first().collect();
    let mut newest_first: Vec<String> = cache.iter().collect();
    newest_first.reverse();
    assert_eq!(oldest_first, newest_first);
}

// == Concurrent Mutation Tests ==

#[test]
fn test_concurrent_mixed_operations() {
    init_tracing();

    let cache: Arc<LruCache<String, u64>> = Arc::new(LruCache::new(16).unwrap());
    let mut handles = Vec::new();

    for t in 0..8u64 {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for i in 0..500u64 {
                let key = format!("key{}", (t * 31 + i) % 40);
                match i % 5 {
                    0 | 1 => cache.set(key, t * 1000 + i),
                    2 => {
                        let _ = cache.get(&key);
                    }
                    3 => {
                        let _ = cache.get_or(&key, 0);
                    }
                    _ => {
                        let _ = cache.delete(&key);
                    }
                }
            }
        }));
    }

    for handle in handles {
        handle.join().expect("worker thread panicked");
    }

    assert_consistent(&cache);
    assert_eq!(cache.len(), cache.items().len());
}

#[test]
fn test_disjoint_keys_survive_concurrent_writers() {
    let cache: Arc<LruCache<String, u64>> = Arc::new(LruCache::new(64).unwrap());
    let mut handles = Vec::new();

    // 4 writers x 16 keys fit exactly, so nothing is ever evicted
    for t in 0..4u64 {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for i in 0..16u64 {
                cache.set(format!("t{}-{}", t, i), t * 100 + i);
            }
        }));
    }

    for handle in handles {
        handle.join().expect("worker thread panicked");
    }

    assert_eq!(cache.len(), 64);
    for t in 0..4u64 {
        for i in 0..16u64 {
            assert_eq!(cache.get(&format!("t{}-{}", t, i)), Ok(t * 100 + i));
        }
    }
}

#[test]
fn test_weak_reads_during_mutation() {
    let cache: Arc<LruCache<String, u64>> = Arc::new(LruCache::new(8).unwrap());
    let writer = {
        let cache = Arc::clone(&cache);
        thread::spawn(move || {
            for i in 0..2000u64 {
                cache.set(format!("key{}", i % 20), i);
                if i % 7 == 0 {
                    let _ = cache.delete(&format!("key{}", i % 20));
                }
            }
        })
    };

    // len/contains never block on the writer and never observe an
    // over-capacity state
    for i in 0..2000u64 {
        assert!(cache.len() <= 8);
        let _ = cache.contains(&format!("key{}", i % 20));
    }

    writer.join().expect("writer thread panicked");
    assert_consistent(&cache);
}

#[test]
fn test_clone_under_concurrent_mutation() {
    let cache: Arc<LruCache<String, u64>> = Arc::new(LruCache::new(8).unwrap());
    for i in 0..8u64 {
        cache.set(format!("key{}", i), i);
    }

    let writer = {
        let cache = Arc::clone(&cache);
        thread::spawn(move || {
            for i in 0..1000u64 {
                cache.set(format!("key{}", i % 12), i);
            }
        })
    };

    // Each clone is a consistent point-in-time copy with its own lock
    for _ in 0..50 {
        let copy = cache.clone();
        assert_consistent(&copy);
        copy.set("local".to_string(), 42);
        assert_eq!(copy.get(&"local".to_string()), Ok(42));
    }

    writer.join().expect("writer thread panicked");
    assert!(!cache.contains(&"local".to_string()));
}

// == Snapshot Tests ==

#[test]
fn test_snapshot_round_trip_through_json() {
    init_tracing();

    let cache: LruCache<String, u64> = LruCache::new(3).unwrap();
    cache.set("a".to_string(), 1);
    cache.set("b".to_string(), 2);
    cache.set("c".to_string(), 3);
    cache.get(&"a".to_string()).unwrap();

    let snapshot = cache.snapshot();
    let json = serde_json::to_string(&snapshot).unwrap();
    let decoded: Snapshot<String, u64> = serde_json::from_str(&json).unwrap();

    let restored = LruCache::from_snapshot(decoded).unwrap();
    assert_eq!(restored.capacity(), 3);
    assert_eq!(restored.items(), cache.items());

    // The restored cache has live recency: b is the next eviction candidate
    restored.set("d".to_string(), 4);
    assert_eq!(restored.get(&"b".to_string()), Err(CacheError::NotFound));
    assert!(restored.contains(&"c".to_string()));
    assert!(restored.contains(&"a".to_string()));
}

#[test]
fn test_restored_cache_is_independent() {
    let cache: LruCache<String, u64> = LruCache::new(4).unwrap();
    cache.set("a".to_string(), 1);

    let restored = LruCache::from_snapshot(cache.snapshot()).unwrap();
    cache.set("b".to_string(), 2);
    restored.set("c".to_string(), 3);

    assert!(!restored.contains(&"b".to_string()));
    assert!(!cache.contains(&"c".to_string()));
}

#[test]
fn test_restored_cache_usable_across_threads() {
    // The guard is rebuilt fresh on restore; the restored cache must be
    // shareable exactly like a newly constructed one
    let source: LruCache<String, u64> = LruCache::new(32).unwrap();
    for i in 0..10u64 {
        source.set(format!("key{}", i), i);
    }

    let restored = Arc::new(LruCache::from_snapshot(source.snapshot()).unwrap());
    let mut handles = Vec::new();
    for t in 0..4u64 {
        let restored = Arc::clone(&restored);
        handles.push(thread::spawn(move || {
            for i in 0..100u64 {
                restored.set(format!("t{}-{}", t, i % 5), i);
                let _ = restored.get(&format!("key{}", i % 10));
            }
        }));
    }
    for handle in handles {
        handle.join().expect("worker thread panicked");
    }

    assert_consistent(&restored);
}
