//! Concurrency tests for caches and registries.
//!
//! Run with: `cargo test --test concurrency`

use futures::future::join_all;
use lru_store::{AutoCache, LruCache, ManualCache, NamedAutoRegistry, NamedManualRegistry};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

fn init_logging() {
    env_logger::builder().is_test(true).try_init().ok();
}

/// Many tasks racing on the first `get_store` for one name all see one store.
#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_registry_memoizes_under_contention() {
    init_logging();

    let registry = Arc::new(
        NamedAutoRegistry::new(16, |k: &u32| *k).expect("Failed to create registry"),
    );

    let tasks = (0..64).map(|_| {
        let registry = Arc::clone(&registry);
        tokio::task::spawn_blocking(move || registry.get_store("X").expect("Failed to get store"))
    });

    let stores: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|r| r.expect("Task panicked"))
        .collect();

    let first = &stores[0];
    assert!(stores.iter().all(|s| Arc::ptr_eq(first, s)));
    assert_eq!(registry.len(), 1);
    assert!(registry.contains("X"));
}

/// Stores under different names never share capacity or entries.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_registry_names_are_isolated() {
    init_logging();

    let registry = Arc::new(NamedManualRegistry::new(8).expect("Failed to create registry"));

    let tasks = (0..8u32).map(|t| {
        let registry = Arc::clone(&registry);
        tokio::task::spawn_blocking(move || {
            let store = registry
                .get_store(&format!("store-{}", t))
                .expect("Failed to get store");
            for i in 0..100u32 {
                store.add_to_cache(i, t);
            }
        })
    });

    for result in join_all(tasks).await {
        result.expect("Task panicked");
    }

    assert_eq!(registry.len(), 8);
    for t in 0..8u32 {
        let store = registry
            .get_store(&format!("store-{}", t))
            .expect("Failed to get store");
        assert_eq!(store.len(), 8);
        assert!(store.snapshot().iter().all(|v| *v == t));

        let keys: HashSet<u32> = store.snapshot_with_keys().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, (92..100).collect::<HashSet<u32>>());
    }
}

/// Snapshots taken while writers churn the cache are always internally
/// consistent and never exceed capacity.
#[test]
fn test_snapshot_isolation_under_mutation() {
    init_logging();

    const CAPACITY: usize = 32;
    let cache = Arc::new(LruCache::new(CAPACITY).expect("Failed to create cache"));
    let done = Arc::new(AtomicBool::new(false));

    let writers: Vec<_> = (0..4)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..5_000u64 {
                    let key = (t * 10_000 + i) % 200;
                    cache.set(key, key * 2);
                    if i % 7 == 0 {
                        cache.remove(&((key + 1) % 200));
                    }
                }
            })
        })
        .collect();

    let reader = {
        let cache = Arc::clone(&cache);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut snapshots = 0;
            loop {
                let finished = done.load(Ordering::Acquire);
                let entries = cache.snapshot_with_keys();
                assert!(entries.len() <= CAPACITY);

                let keys: HashSet<u64> = entries.iter().map(|(k, _)| *k).collect();
                assert_eq!(keys.len(), entries.len(), "duplicate key in snapshot");
                for (k, v) in &entries {
                    assert_eq!(*v, k * 2);
                }
                snapshots += 1;
                if finished {
                    break;
                }
            }
            snapshots
        })
    };

    for writer in writers {
        writer.join().expect("Writer panicked");
    }
    done.store(true, Ordering::Release);
    let snapshots = reader.join().expect("Reader panicked");

    assert!(snapshots > 0);
    assert!(cache.len() <= CAPACITY);
}

/// Concurrent misses on one key may each run the factory; the cache still
/// ends up holding exactly one value for it.
#[test]
fn test_concurrent_misses_leave_one_value() {
    init_logging();

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let cache = Arc::new(
        AutoCache::new(4, move |_k: &u32| counter.fetch_add(1, Ordering::SeqCst))
            .expect("Failed to create cache"),
    );

    let barrier = Arc::new(Barrier::new(8));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                cache.get_or_add(&7)
            })
        })
        .collect();

    let returned: Vec<usize> = handles
        .into_iter()
        .map(|h| h.join().expect("Thread panicked"))
        .collect();

    let factory_calls = calls.load(Ordering::SeqCst);
    assert!((1..=8).contains(&factory_calls));
    assert_eq!(cache.len(), 1);

    let cached = cache.get(&7).expect("Value missing");
    assert!(cached < factory_calls);
    assert!(returned.iter().all(|v| *v < factory_calls));
}

/// Last write to land wins for a single key.
#[test]
fn test_last_writer_wins() {
    let cache = Arc::new(ManualCache::new(2).expect("Failed to create cache"));

    let handles: Vec<_> = (0..4u32)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..1_000u32 {
                    cache.set("k", t * 1_000 + i);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Writer panicked");
    }

    let value = cache.get(&"k").expect("Value missing");
    assert_eq!(value % 1_000, 999);
    assert_eq!(cache.len(), 1);
}
