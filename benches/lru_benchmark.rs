//! Benchmarks for LRU cache and registry throughput.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lru_store::{AutoCache, LruCache, NamedManualRegistry};
use rand::Rng;
use std::hint::black_box;

/// Benchmark inserts into a full cache, so every fresh key evicts.
fn bench_set_with_eviction(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_with_eviction");

    for capacity in [128usize, 1024, 16384].iter() {
        group.throughput(Throughput::Elements(10_000));
        group.bench_with_input(
            BenchmarkId::from_parameter(capacity),
            capacity,
            |b, &capacity| {
                let cache = LruCache::new(capacity).expect("Failed to create cache");
                b.iter(|| {
                    for i in 0..10_000u64 {
                        cache.set(i, i);
                    }
                    black_box(cache.len())
                });
            },
        );
    }

    group.finish();
}

/// Benchmark random reads against a skewed key stream.
fn bench_get_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_mixed");

    let mut rng = rand::rng();
    // 80% of reads hit a small hot set.
    let keys: Vec<u64> = (0..10_000)
        .map(|_| {
            if rng.random_bool(0.8) {
                rng.random_range(0..256)
            } else {
                rng.random_range(0..100_000)
            }
        })
        .collect();

    let cache = LruCache::new(1024).expect("Failed to create cache");
    for i in 0..1024u64 {
        cache.set(i, i);
    }

    group.throughput(Throughput::Elements(keys.len() as u64));
    group.bench_function("10000_keys", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for key in &keys {
                if cache.get(key).is_some() {
                    hits += 1;
                }
            }
            black_box(hits)
        });
    });

    group.finish();
}

/// Benchmark load-on-miss through the factory path.
fn bench_get_or_add(c: &mut Criterion) {
    let cache = AutoCache::new(512, |k: &u64| k.wrapping_mul(31)).expect("Failed to create cache");

    c.bench_function("get_or_add_cycle_1024", |b| {
        b.iter(|| {
            for i in 0..1024u64 {
                black_box(cache.get_or_add(&i));
            }
        });
    });
}

/// Benchmark registry lookups for already provisioned names.
fn bench_registry_lookup(c: &mut Criterion) {
    let registry: NamedManualRegistry<u64, u64> =
        NamedManualRegistry::new(64).expect("Failed to create registry");
    let names: Vec<String> = (0..32).map(|i| format!("store-{}", i)).collect();
    for name in &names {
        registry.get_store(name).expect("Failed to get store");
    }

    c.bench_function("registry_get_store_32", |b| {
        b.iter(|| {
            for name in &names {
                black_box(registry.get_store(name).expect("Failed to get store"));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_set_with_eviction,
    bench_get_mixed,
    bench_get_or_add,
    bench_registry_lookup
);
criterion_main!(benches);
