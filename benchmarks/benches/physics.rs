//! Collision pipeline benchmarks (criterion - wall-clock time).
//!
//! Run all:    cargo bench --manifest-path benchmarks/Cargo.toml --bench physics
//! Filter:     cargo bench --manifest-path benchmarks/Cargo.toml --bench physics -- broadphase

use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use impact2d::{
    Aabb, Body, BodyPair, Broadphase, BroadphaseKind, BruteForceBroadphase, Detector,
    SatDetector, Shape, SolverKind, SpatialBroadphase, WorldConfig,
};
use impact2d_bench::*;

// ---------------------------------------------------------------------------
// Broadphase
// ---------------------------------------------------------------------------

fn bench_broadphase(c: &mut Criterion) {
    let bounds = Aabb::new(Vec2::ZERO, Vec2::new(WORLD_WIDTH, WORLD_HEIGHT));

    for (name, setup) in [
        ("circles", setup_circles as fn(usize) -> _),
        ("mixed", setup_mixed),
        ("sparse", setup_sparse),
    ] {
        let mut group = c.benchmark_group(format!("broadphase/{name}"));
        for &n in &[100, 500, 1000] {
            let bodies = setup(n);

            group.bench_with_input(BenchmarkId::new("brute_force", n), &n, |b, _| {
                let mut broadphase = BruteForceBroadphase;
                b.iter(|| broadphase.pair(&bodies, &bounds));
            });

            group.bench_with_input(BenchmarkId::new("spatial", n), &n, |b, _| {
                let mut broadphase = SpatialBroadphase::new();
                b.iter(|| broadphase.pair(&bodies, &bounds));
            });
        }
        group.finish();
    }
}

// ---------------------------------------------------------------------------
// Narrowphase
// ---------------------------------------------------------------------------

fn bench_narrowphase(c: &mut Criterion) {
    let mut group = c.benchmark_group("narrowphase/sat");
    let pair = BodyPair { a: 0, b: 1 };

    let circle = |x: f32| Shape::circle(Vec2::new(x, 0.0), 1.0).ok();
    let square = |x: f32| Shape::rect(Vec2::new(x, -1.0), 2.0, 2.0).ok();

    let cases = [
        ("circle_circle_hit", circle(0.0), circle(1.5)),
        ("circle_circle_miss", circle(0.0), circle(5.0)),
        ("circle_polygon_hit", circle(0.0), square(0.5)),
        ("polygon_polygon_hit", square(0.0), square(1.5)),
        ("polygon_polygon_miss", square(0.0), square(5.0)),
    ];

    for (name, a, b) in cases {
        let (Some(a), Some(b)) = (a, b) else { continue };
        let bodies = [Body::new(a), Body::new(b)];
        group.bench_function(name, |bench| {
            bench.iter(|| SatDetector.intersects(&bodies, pair));
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Full pipeline
// ---------------------------------------------------------------------------

fn bench_pipeline(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("pipeline/step");
        group.sample_size(30);
        for &n in &[50, 100, 500, 1000] {
            group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
                b.iter_batched(
                    || setup_world(n, config(Vec2::new(0.0, 0.2))),
                    |mut world| world.step(Duration::ZERO),
                    criterion::BatchSize::LargeInput,
                );
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("pipeline/strategies_500");
        group.sample_size(20);
        for (name, broadphase, solver) in [
            ("brute_arcade", BroadphaseKind::BruteForce, SolverKind::Arcade),
            ("brute_impulse", BroadphaseKind::BruteForce, SolverKind::Impulse),
            ("spatial_arcade", BroadphaseKind::Spatial, SolverKind::Arcade),
            ("spatial_impulse", BroadphaseKind::Spatial, SolverKind::Impulse),
        ] {
            group.bench_function(name, |b| {
                b.iter_batched(
                    || {
                        let world_config = WorldConfig {
                            broadphase,
                            solver,
                            ..config(Vec2::new(0.0, 0.2))
                        };
                        setup_world(500, world_config)
                    },
                    |mut world| world.step(Duration::ZERO),
                    criterion::BatchSize::LargeInput,
                );
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("pipeline/sustained_60steps");
        group.sample_size(10);
        for &n in &[100, 500] {
            group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
                b.iter_batched(
                    || setup_world(n, config(Vec2::new(0.0, 0.2))),
                    |mut world| {
                        for frame in 0..60u64 {
                            world.step(Duration::from_millis(frame * 16));
                        }
                        world
                    },
                    criterion::BatchSize::LargeInput,
                );
            });
        }
        group.finish();
    }
}

criterion_group!(benches, bench_broadphase, bench_narrowphase, bench_pipeline);
criterion_main!(benches);
