//! Benchmarks for a full emitter update under each execution strategy.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use glam::Vec2;
use particle_engine::{
    AgeModifier, DragModifier, ExecutionStrategy, Interpolator, LinearGravityModifier,
    ParticleEmitter, ReleaseParameters, RotationModifier, SprayProfile, ValueRange,
};
use std::hint::black_box;

/// Build an emitter already filled to `count` live particles.
fn saturated_emitter(count: usize, strategy: ExecutionStrategy) -> ParticleEmitter {
    let mut emitter = ParticleEmitter::builder("bench")
        .capacity(count)
        .lifespan(1.0e9)
        .profile(SprayProfile {
            direction: Vec2::NEG_Y,
            spread: 1.0,
        })
        .parameters(ReleaseParameters {
            quantity: ValueRange::constant(count as u32),
            speed: ValueRange::new(10.0, 100.0),
            ..ReleaseParameters::default()
        })
        .modifier(LinearGravityModifier {
            direction: Vec2::Y,
            strength: 98.0,
        })
        .modifier(DragModifier {
            drag_coefficient: 0.47,
            density: 0.5,
        })
        .modifier(RotationModifier { rotation_rate: 1.0 })
        .modifier(AgeModifier::new(vec![
            Interpolator::Opacity {
                start: 1.0,
                end: 0.0,
            },
            Interpolator::Scale {
                start: Vec2::ONE,
                end: Vec2::splat(2.0),
            },
        ]))
        .execution_strategy(strategy)
        .seed(1)
        .build()
        .expect("Failed to build bench emitter");

    emitter.trigger(Vec2::ZERO, 0.0);
    emitter
}

/// Compare Serial and Parallel as the live particle count grows.
fn bench_update_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("emitter_update");

    for count in [1_000usize, 10_000, 100_000] {
        group.throughput(Throughput::Elements(count as u64));

        for strategy in [ExecutionStrategy::Serial, ExecutionStrategy::Parallel] {
            let mut emitter = saturated_emitter(count, strategy);
            group.bench_with_input(
                BenchmarkId::new(strategy.as_str(), count),
                &count,
                |b, _| {
                    b.iter(|| emitter.update(black_box(1.0 / 60.0), Vec2::ZERO));
                },
            );
        }
    }

    group.finish();
}

/// Cost of releasing a full batch into an empty buffer.
fn bench_trigger(c: &mut Criterion) {
    let mut emitter = saturated_emitter(10_000, ExecutionStrategy::Serial);

    c.bench_function("trigger_10000", |b| {
        b.iter(|| {
            emitter.clear();
            emitter.trigger(black_box(Vec2::new(10.0, 10.0)), 0.0)
        });
    });
}

criterion_group!(benches, bench_update_strategies, bench_trigger);
criterion_main!(benches);
