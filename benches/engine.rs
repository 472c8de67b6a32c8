use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use lifegrid::engine::{CaveConfig, CaveGen, DenseLife, SmoothConfig, SmoothLife, SparseLife};
use lifegrid::{Pattern, Pos2};

fn diagonal_pattern(width: i32, height: i32) -> Pattern {
    let mut offsets = Vec::new();
    for y in 0..height {
        for x in 0..width {
            if (x + y) % 3 == 0 {
                offsets.push(Pos2 {
                    x: x - width / 2,
                    y: y - height / 2,
                });
            }
        }
    }
    Pattern::Offsets(offsets)
}

fn bench_life(c: &mut Criterion) {
    let mut group = c.benchmark_group("life_step");
    for size in [64, 128, 256] {
        let pattern = diagonal_pattern(size, size);
        let side = size as usize;

        group.bench_with_input(BenchmarkId::new("dense", size), &pattern, |b, pattern| {
            b.iter_batched(
                || DenseLife::new(side, side, pattern),
                |mut game| game.step(),
                BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("sparse", size), &pattern, |b, pattern| {
            b.iter_batched(
                || SparseLife::new(Pos2::zero(), pattern),
                |mut game| game.step(),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_fields(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_step");
    for size in [64, 128] {
        group.bench_with_input(BenchmarkId::new("smooth", size), &size, |b, &size| {
            b.iter_batched(
                || SmoothLife::seeded(size, size, SmoothConfig::default(), 1),
                |mut life| life.update(),
                BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("cave", size), &size, |b, &size| {
            b.iter_batched(
                || CaveGen::seeded(size, size, CaveConfig::default(), 1),
                |mut cave| cave.step(),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_life, bench_fields);
criterion_main!(benches);
