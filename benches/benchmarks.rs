//! Benchmarks for stratsample algorithms
//!
//! Run with: cargo bench --features full

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;

use stratsample::item::FrequencyItem;
use stratsample::sampling::{reservoir_sample, ReservoirSampler};
use stratsample::selection::{allocate, StratifiedSelector};
use stratsample::statistics::median_mad;

fn frequency_stream(n: usize) -> Vec<FrequencyItem> {
    (0..n)
        .map(|i| {
            // mostly small counts with a heavy tail every 97th item
            let freq = if i % 97 == 0 { 10_000 + i } else { i % 31 };
            FrequencyItem::new(format!("doc{:08}", i), freq as f64)
        })
        .collect()
}

// ============================================================================
// Robust Statistics Benchmarks
// ============================================================================

fn bench_median_mad(c: &mut Criterion) {
    let mut group = c.benchmark_group("median_mad");

    for n in [1_000usize, 100_000] {
        let values: Vec<f64> = frequency_stream(n).iter().map(|i| i.frequency).collect();
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &values, |b, values| {
            b.iter(|| black_box(median_mad(values).unwrap()));
        });
    }

    group.finish();
}

// ============================================================================
// Reservoir Sampler Benchmarks
// ============================================================================

fn bench_reservoir(c: &mut Criterion) {
    let mut group = c.benchmark_group("reservoir");
    group.throughput(Throughput::Elements(1));

    for capacity in [10, 100, 1000] {
        group.bench_function(format!("add_k{}", capacity), |b| {
            let mut sampler = ReservoirSampler::<u64>::with_seed(capacity, 42);
            let mut i = 0u64;
            b.iter(|| {
                sampler.add(black_box(i));
                i = i.wrapping_add(1);
            });
        });
    }

    group.bench_function("sample_100k_k100", |b| {
        let mut rng = StdRng::seed_from_u64(7);
        b.iter(|| black_box(reservoir_sample(0..100_000u64, 100, &mut rng).unwrap()));
    });

    group.finish();
}

// ============================================================================
// Allocation Benchmarks
// ============================================================================

fn bench_allocate(c: &mut Criterion) {
    c.bench_function("allocate", |b| {
        let mut k = 0i64;
        b.iter(|| {
            k = (k + 1) % 10_000;
            black_box(allocate(black_box(7_919), black_box(104_729), k).unwrap())
        });
    });
}

// ============================================================================
// Stratified Selection Benchmarks
// ============================================================================

fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("stratified_select");

    for n in [10_000usize, 100_000] {
        let stream = frequency_stream(n);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("whole", n), &stream, |b, stream| {
            let mut selector = StratifiedSelector::with_seed(1);
            b.iter(|| black_box(selector.select(stream, 500).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("chunked_10k", n), &stream, |b, stream| {
            let mut selector = StratifiedSelector::with_seed(1);
            b.iter(|| {
                black_box(
                    selector
                        .select_chunked(stream, 10_000, |len| Ok(len as i64 / 200))
                        .unwrap(),
                )
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_median_mad,
    bench_reservoir,
    bench_allocate,
    bench_select,
);

criterion_main!(benches);
