//! Durable put latency per backend.
//!
//! Every iteration is one synced put of a small payload under a fresh key.

use std::sync::atomic::{AtomicU64, Ordering};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use syncput_benchmarks::store::Sizing;
use syncput_benchmarks::{Payload, SyncStore, Target};

const PAYLOAD_SIZES: [usize; 2] = [128, 4096];
// Only sizes the preallocated file; the other backends ignore it.
const EXPECTED_PUTS: u64 = 100_000;

fn sync_put(c: &mut Criterion) {
    let mut group = c.benchmark_group("sync_put");
    group.sample_size(20);

    for size in PAYLOAD_SIZES {
        let payload = Payload::filled(size);
        group.throughput(Throughput::Bytes(size as u64));

        for target in Target::ALL {
            let dir = tempfile::tempdir().unwrap();
            let sizing = Sizing {
                count: EXPECTED_PUTS,
                unit: size,
            };
            let mut store = target.open(dir.path(), sizing).unwrap();
            let counter = AtomicU64::new(0);

            group.bench_function(BenchmarkId::new(target.label(), size), |b| {
                b.iter(|| {
                    let key = counter.fetch_add(1, Ordering::Relaxed).to_string();
                    store.put_durable(key.as_bytes(), payload.as_bytes()).unwrap();
                });
            });
        }
    }
    group.finish();
}

criterion_group!(benches, sync_put);
criterion_main!(benches);
