//! Benchmarks for grid engine hot paths.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use matrixgrid::engine::{self, SeededAmounts};
use matrixgrid::layout::row_window;
use matrixgrid::nearest::find_nearest;
use matrixgrid::types::MatrixSnapshot;

fn seeded_grid(rows: usize, cols: usize) -> MatrixSnapshot {
    let mut rng = SeededAmounts::new(0xC0FFEE);
    engine::generate(rows, cols, || rng.next_amount())
}

/// Full generation including derived statistics
fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for size in [10usize, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut rng = SeededAmounts::new(1);
            b.iter(|| engine::generate(black_box(size), black_box(size), || rng.next_amount()))
        });
    }
    group.finish();
}

/// Single-cell mutation on the largest grid (full recompute)
fn bench_increment(c: &mut Criterion) {
    let snapshot = seeded_grid(100, 100);
    c.bench_function("increment_cell_100x100", |b| {
        b.iter(|| engine::increment_cell(black_box(&snapshot), black_box(5_050)))
    });
}

/// Bounded top-K selection versus k
fn bench_nearest(c: &mut Criterion) {
    let snapshot = seeded_grid(100, 100);
    let target = snapshot.matrix.first().and_then(|r| r.first()).copied();
    let Some(target) = target else {
        return;
    };

    let mut group = c.benchmark_group("find_nearest_100x100");
    for k in [1usize, 10, 100, 1_000] {
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
            b.iter(|| find_nearest(black_box(&snapshot.matrix), target.id, target.amount, k))
        });
    }
    group.finish();
}

fn bench_window(c: &mut Criterion) {
    c.bench_function("row_window", |b| {
        b.iter(|| row_window(black_box(10_000), black_box(123_456.0), 800.0, 40.0, 5))
    });
}

criterion_group!(
    benches,
    bench_generate,
    bench_increment,
    bench_nearest,
    bench_window
);
criterion_main!(benches);
