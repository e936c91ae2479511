//! Sorting algorithm benchmarks
//!
//! Compares the quicksort variants, mergesort and the distribution sorts
//! against `slice::sort` / `slice::sort_unstable` across input shapes.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use dsakit::algorithms::{
    counting_sort, lsd_radix_sort, merge_sort, quick_select, quick_sort, quick_sort_3way,
    quick_sort_median3, shuffle,
};
use dsakit::compare::NaturalOrder;
use dsakit::Random64;

const SIZES: &[usize] = &[1_000, 10_000, 100_000];

fn shaped_inputs(n: usize) -> Vec<(&'static str, Vec<u32>)> {
    let mut rng = Random64::with_seed(7, 7);
    let random: Vec<u32> = (0..n).map(|_| rng.uniform(0, 1 << 20).unwrap_or(0) as u32).collect();
    let few_unique: Vec<u32> = (0..n).map(|_| rng.uniform(0, 7).unwrap_or(0) as u32).collect();
    let sorted: Vec<u32> = (0..n as u32).collect();
    let mut nearly_sorted = sorted.clone();
    for _ in 0..n / 100 {
        let i = rng.uniform_usize(n - 1);
        let j = rng.uniform_usize(n - 1);
        nearly_sorted.swap(i, j);
    }
    vec![
        ("random", random),
        ("few_unique", few_unique),
        ("sorted", sorted),
        ("nearly_sorted", nearly_sorted),
    ]
}

/// Benchmark comparison sorts against std
fn bench_comparison_sorts(c: &mut Criterion) {
    let mut group = c.benchmark_group("comparison_sorts");

    for &size in SIZES {
        group.throughput(Throughput::Elements(size as u64));
        for (shape, input) in shaped_inputs(size) {
            let id = format!("{}_{}", shape, size);

            group.bench_with_input(BenchmarkId::new("quick_sort", &id), &input, |b, input| {
                let mut rng = Random64::new();
                b.iter_batched_ref(
                    || input.clone(),
                    |v| quick_sort(v, &NaturalOrder, &mut rng),
                    BatchSize::LargeInput,
                );
            });

            group.bench_with_input(BenchmarkId::new("quick_sort_median3", &id), &input, |b, input| {
                b.iter_batched_ref(
                    || input.clone(),
                    |v| quick_sort_median3(v, &NaturalOrder),
                    BatchSize::LargeInput,
                );
            });

            group.bench_with_input(BenchmarkId::new("quick_sort_3way", &id), &input, |b, input| {
                let mut rng = Random64::new();
                b.iter_batched_ref(
                    || input.clone(),
                    |v| quick_sort_3way(v, &NaturalOrder, &mut rng),
                    BatchSize::LargeInput,
                );
            });

            group.bench_with_input(BenchmarkId::new("merge_sort", &id), &input, |b, input| {
                b.iter_batched_ref(
                    || input.clone(),
                    |v| merge_sort(v, &NaturalOrder).unwrap(),
                    BatchSize::LargeInput,
                );
            });

            group.bench_with_input(BenchmarkId::new("std_sort", &id), &input, |b, input| {
                b.iter_batched_ref(|| input.clone(), |v| v.sort(), BatchSize::LargeInput);
            });

            group.bench_with_input(BenchmarkId::new("std_sort_unstable", &id), &input, |b, input| {
                b.iter_batched_ref(|| input.clone(), |v| v.sort_unstable(), BatchSize::LargeInput);
            });
        }
    }

    group.finish();
}

/// Benchmark counting and radix sorts
fn bench_distribution_sorts(c: &mut Criterion) {
    let mut group = c.benchmark_group("distribution_sorts");

    for &size in SIZES {
        group.throughput(Throughput::Elements(size as u64));
        let mut rng = Random64::with_seed(3, 5);
        let small_keys: Vec<u16> = (0..size)
            .map(|_| rng.uniform(0, 1023).unwrap_or(0) as u16)
            .collect();
        let byte_keys: Vec<[u8; 4]> = (0..size)
            .map(|_| (rng.next_u64() as u32).to_be_bytes())
            .collect();

        group.bench_with_input(BenchmarkId::new("counting_sort", size), &small_keys, |b, input| {
            b.iter_batched_ref(
                || input.clone(),
                |v| counting_sort(v, 1023).unwrap(),
                BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("lsd_radix_sort", size), &byte_keys, |b, input| {
            b.iter_batched_ref(
                || input.clone(),
                |v| lsd_radix_sort(v).unwrap(),
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

/// Benchmark selection and shuffling
fn bench_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection");

    for &size in SIZES {
        group.throughput(Throughput::Elements(size as u64));
        let input: Vec<u32> = (0..size as u32).collect();

        group.bench_with_input(BenchmarkId::new("quick_select_median", size), &input, |b, input| {
            let mut rng = Random64::new();
            b.iter_batched_ref(
                || {
                    let mut v = input.clone();
                    shuffle(&mut v, &mut Random64::with_seed(1, 1));
                    v
                },
                |v| {
                    let k = v.len() / 2;
                    *quick_select(v, k, &NaturalOrder, &mut rng).unwrap()
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("shuffle", size), &input, |b, input| {
            let mut rng = Random64::new();
            b.iter_batched_ref(|| input.clone(), |v| shuffle(v, &mut rng), BatchSize::LargeInput);
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_comparison_sorts,
    bench_distribution_sorts,
    bench_selection
);
criterion_main!(benches);
