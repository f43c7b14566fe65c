/*!
 * Lock Registry Benchmarks
 *
 * Compare per-strategy workload throughput and the registry hot paths
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use named_locks::harness::workload;
use named_locks::{LockRegistry, RwLockRegistry, Strategy, WorkloadConfig};
use std::sync::Arc;
use std::thread;

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("workload_strategies");
    group.sample_size(10);

    let config = WorkloadConfig {
        workers: 4,
        iterations: 5,
        objects: 200,
        write_ratio: 0.25,
    };

    for strategy in [Strategy::GlobalLock, Strategy::NamedLock, Strategy::NamedRwLock] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{:?}", strategy)),
            &strategy,
            |b, &strategy| {
                b.iter(|| workload::run(&config, strategy).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_get_or_create(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_or_create");

    group.bench_function("hit_existing_key", |b| {
        let registry = LockRegistry::new();
        let key = "hot".to_string();
        registry.get(&key);
        b.iter(|| black_box(registry.get(&key)));
    });

    group.bench_function("create_fresh_keys", |b| {
        let registry = LockRegistry::new();
        let mut counter = 0u64;
        b.iter(|| {
            counter += 1;
            black_box(registry.get(&format!("key-{counter}")));
        });
    });

    group.finish();
}

fn bench_contended_with_lock(c: &mut Criterion) {
    let mut group = c.benchmark_group("contended_with_lock");
    group.sample_size(10);

    for threads in [2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::from_parameter(threads),
            &threads,
            |b, &threads| {
                b.iter(|| {
                    let registry = Arc::new(LockRegistry::new());
                    let handles: Vec<_> = (0..threads)
                        .map(|_| {
                            let registry = registry.clone();
                            thread::spawn(move || {
                                for _ in 0..100 {
                                    registry.with_lock(&"single".to_string(), || black_box(()));
                                }
                            })
                        })
                        .collect();
                    for handle in handles {
                        handle.join().unwrap();
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_read_vs_write_sections(c: &mut Criterion) {
    let mut group = c.benchmark_group("rw_sections");

    let registry = RwLockRegistry::new();
    let key = "doc".to_string();
    registry.get(&key);

    group.bench_function("uncontended_read", |b| {
        b.iter(|| registry.with_read(&key, || black_box(1)));
    });
    group.bench_function("uncontended_write", |b| {
        b.iter(|| registry.with_write(&key, || black_box(1)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_strategies,
    bench_get_or_create,
    bench_contended_with_lock,
    bench_read_vs_write_sections
);
criterion_main!(benches);
