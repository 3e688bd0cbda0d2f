//! Throughput Benchmark for AirPaste
//!
//! This benchmark measures the store and the gateway under various workloads.

use airpaste::gateway::Gateway;
use airpaste::keys::random_string;
use airpaste::storage::{ConcurrentStore, SetOptions};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::sync::Arc;
use std::time::Duration;

/// Benchmark SET operations
fn bench_set(c: &mut Criterion) {
    let store = ConcurrentStore::new();

    let mut group = c.benchmark_group("set");
    group.throughput(Throughput::Elements(1));

    group.bench_function("set_small", |b| {
        let mut i = 0u64;
        b.iter(|| {
            store.set(&format!("key:{}", i), "small_value", None);
            i += 1;
        });
    });

    group.bench_function("set_large", |b| {
        let mut i = 0u64;
        let value = "x".repeat(64 * 1024); // 64KB value
        b.iter(|| {
            store.set(&format!("key:{}", i), &value, None);
            i += 1;
        });
    });

    group.finish();
}

/// Benchmark GET operations
fn bench_get(c: &mut Criterion) {
    let store = ConcurrentStore::new();

    // Pre-populate with data
    for i in 0..100_000 {
        store.set(
            &format!("key:{}", i),
            &format!("value:{}", i),
            Some(SetOptions::perpetual()),
        );
    }

    let mut group = c.benchmark_group("get");
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_existing", |b| {
        let mut i = 0u64;
        b.iter(|| {
            black_box(store.get(&format!("key:{}", i % 100_000)));
            i += 1;
        });
    });

    group.bench_function("get_missing", |b| {
        let mut i = 0u64;
        b.iter(|| {
            black_box(store.get(&format!("missing:{}", i)));
            i += 1;
        });
    });

    group.finish();
}

/// Benchmark reads that hit expired entries (the write-lock path)
fn bench_expired_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("expiry");
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_expired", |b| {
        b.iter_batched(
            || {
                let store = ConcurrentStore::new();
                store.set("stale", "value", Some(SetOptions::with_ttl(Duration::ZERO)));
                std::thread::sleep(Duration::from_micros(10));
                store
            },
            |store| black_box(store.get("stale")),
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

/// Benchmark key generation
fn bench_keygen(c: &mut Criterion) {
    let mut group = c.benchmark_group("keygen");
    group.throughput(Throughput::Elements(1));

    for len in [4usize, 8] {
        group.bench_function(format!("random_string_{}", len), |b| {
            b.iter(|| black_box(random_string(len).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark issuance through the gateway
fn bench_issue(c: &mut Criterion) {
    let mut group = c.benchmark_group("gateway");
    group.throughput(Throughput::Elements(1));

    group.bench_function("issue_and_store", |b| {
        let gateway = Gateway::in_memory();
        b.iter(|| black_box(gateway.issue_and_store("pasted text", None).unwrap()));
    });

    group.finish();
}

/// Benchmark concurrent issuance and retrieval
fn bench_concurrent(c: &mut Criterion) {
    use std::thread;

    let mut group = c.benchmark_group("concurrent");
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("4_threads_issue_retrieve", |b| {
        b.iter(|| {
            let gateway = Arc::new(Gateway::in_memory());
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let gateway = Arc::clone(&gateway);
                    thread::spawn(move || {
                        for _ in 0..1_000 {
                            let key = gateway.issue_and_store("value", None).unwrap();
                            gateway.retrieve(&key);
                        }
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }

            black_box(gateway.store().len());
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_set,
    bench_get,
    bench_expired_reads,
    bench_keygen,
    bench_issue,
    bench_concurrent,
);

criterion_main!(benches);
