//! Throughput Benchmark for keystash
//!
//! Measures the facade's hot paths over the in-memory backend: single
//! writes, TTL writes, reads, batch fan-out, and the active sweep.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use keystash::{SetOptions, Store, Value};
use std::time::Duration;

/// Benchmark SET operations
fn bench_set(c: &mut Criterion) {
    let store = Store::in_memory();

    let mut group = c.benchmark_group("set");
    group.throughput(Throughput::Elements(1));

    group.bench_function("set_scalar", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let key = format!("key:{}", i);
            store.set(&key, "small_value").unwrap();
            i += 1;
        });
    });

    group.bench_function("set_with_ttl", |b| {
        let mut i = 0u64;
        let opts = SetOptions::with_ttl(Duration::from_secs(3600));
        b.iter(|| {
            let key = format!("key:{}", i);
            store.set_with(&key, "small_value", &opts).unwrap();
            i += 1;
        });
    });

    group.bench_function("set_json_object", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let key = format!("key:{}", i);
            let value = Value::object([
                ("name", Value::from("bench")),
                ("count", Value::from(42)),
            ]);
            store.set(&key, value).unwrap();
            i += 1;
        });
    });

    group.finish();
}

/// Benchmark GET operations
fn bench_get(c: &mut Criterion) {
    let store = Store::in_memory();

    // Pre-populate with data
    for i in 0..10_000 {
        let key = format!("key:{}", i);
        store.set(&key, format!("value:{}", i)).unwrap();
    }

    let mut group = c.benchmark_group("get");
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_hit", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let key = format!("key:{}", i % 10_000);
            black_box(store.get(&key));
            i += 1;
        });
    });

    group.bench_function("get_miss", |b| {
        b.iter(|| {
            black_box(store.get("nonexistent"));
        });
    });

    group.finish();
}

/// Benchmark batch fan-out
fn bench_fan_out(c: &mut Criterion) {
    let store = Store::in_memory();
    let keys: Vec<String> = (0..100).map(|i| format!("fan:{}", i)).collect();
    let key_refs: Vec<&str> = keys.iter().map(String::as_str).collect();
    let values = Value::array((0..100).map(Value::from));

    let mut group = c.benchmark_group("fan_out");
    group.throughput(Throughput::Elements(100));

    group.bench_function("set_many_100", |b| {
        b.iter(|| {
            store
                .set_many(&key_refs, values.clone(), &SetOptions::default())
                .unwrap();
        });
    });

    group.bench_function("get_many_100", |b| {
        b.iter(|| {
            black_box(store.get_many(&key_refs));
        });
    });

    group.finish();
}

/// Benchmark the active expiry sweep over a mixed population
fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep");

    group.bench_function("clear_expired_1k_live", |b| {
        let store = Store::in_memory();
        for i in 0..1_000 {
            let key = format!("key:{}", i);
            store
                .set_with(&key, "v", &SetOptions::with_ttl(Duration::from_secs(3600)))
                .unwrap();
        }
        b.iter(|| {
            black_box(store.clear_expired());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_set, bench_get, bench_fan_out, bench_sweep);
criterion_main!(benches);
