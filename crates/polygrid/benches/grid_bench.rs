//! Criterion benchmarks for the classification grid.
//! Focus sizes: grid_size in {8, 32, 128}, star polygons with 64 vertices.
//! Results live under `target/criterion`.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use nalgebra::Vector2;
use polygrid::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn star64(index: u64) -> Polygon {
    let cfg = StarCfg {
        vertex_count: VertexCount::Fixed(64),
        ..StarCfg::default()
    };
    draw_star_polygon(cfg, ReplayToken { seed: 42, index })
        .and_then(|p| p.normalized().ok())
        .expect("star polygon")
}

fn query_points(count: usize, seed: u64) -> Vec<Vector2<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| Vector2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
        .collect()
}

fn bench_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid");
    for &n in &[8usize, 32, 128] {
        group.bench_with_input(BenchmarkId::new("init", n), &n, |b, &n| {
            b.iter_batched(
                || star64(1),
                |poly| {
                    let _g = Grid::init(&poly, n).unwrap();
                },
                BatchSize::SmallInput,
            )
        });

        let poly = star64(2);
        let grid = Grid::init(&poly, n).unwrap();
        let pts = query_points(4096, 7);
        group.bench_with_input(BenchmarkId::new("classify_4096", n), &n, |b, _| {
            b.iter(|| {
                pts.iter()
                    .filter(|&&p| grid.classify(p).unwrap_or(true))
                    .count()
            })
        });
        group.bench_with_input(BenchmarkId::new("classify_batch_4096", n), &n, |b, _| {
            b.iter(|| grid.classify_batch(&pts).unwrap())
        });
    }
    // Baseline: exact O(edges) test without the grid.
    let poly = star64(2);
    let pts = query_points(4096, 7);
    group.bench_function("winding_4096", |b| {
        b.iter(|| pts.iter().filter(|&&p| poly.contains(p)).count())
    });
    group.finish();
}

criterion_group!(benches, bench_grid);
criterion_main!(benches);
