//! Emitter scenarios driven through the public API.

use glam::Vec2;
use particle_engine::{
    AgeModifier, ExecutionStrategy, HslColor, Interpolator, LinearGravityModifier, Modifier,
    OpacityFastFadeModifier, Particle, ParticleBuffer, ParticleEmitter, PointProfile,
    ReleaseParameters, RotationModifier, ValueRange, VelocityColorModifier,
};
use pretty_assertions::assert_eq;

fn fixed(quantity: u32) -> ReleaseParameters {
    ReleaseParameters {
        quantity: ValueRange::constant(quantity),
        ..ReleaseParameters::default()
    }
}

#[test]
fn test_trigger_saturates_at_capacity() {
    let mut emitter = ParticleEmitter::builder("saturated")
        .capacity(4)
        .profile(PointProfile)
        .parameters(fixed(6))
        .seed(1)
        .build()
        .expect("Failed to build emitter");

    assert_eq!(emitter.trigger(Vec2::ZERO, 0.0), 4);
    assert_eq!(emitter.active_particles(), 4);
    assert_eq!(emitter.trigger(Vec2::ZERO, 0.0), 0);
    assert_eq!(emitter.active_particles(), 4);
    assert!(emitter.buffer().is_full());
}

#[test]
fn test_particle_ages_then_expires() {
    let mut emitter = ParticleEmitter::builder("lifespan")
        .capacity(8)
        .lifespan(1.0)
        .profile(PointProfile)
        .parameters(fixed(1))
        .seed(2)
        .build()
        .expect("Failed to build emitter");

    emitter.trigger(Vec2::ZERO, 0.0);

    assert!(emitter.update(0.5, Vec2::ZERO));
    let age = emitter.particles().next().expect("particle is live").age;
    assert!((age - 0.5).abs() < 1e-6, "age was {age}");

    emitter.update(0.6, Vec2::ZERO);
    assert_eq!(emitter.active_particles(), 0);
}

#[test]
fn test_fast_fade_is_linear_in_age() {
    let mut buffer = ParticleBuffer::new(1).expect("Failed to allocate buffer");
    buffer.release(1).for_each_mut(|p| {
        *p = Particle {
            age: 0.3,
            ..Particle::default()
        };
    });

    OpacityFastFadeModifier.update(0.016, &mut buffer.cursor());

    assert_eq!(buffer.iter().next().map(|p| p.opacity), Some(0.7));
}

fn busy_modifiers() -> Vec<Box<dyn Modifier>> {
    vec![
        Box::new(LinearGravityModifier {
            direction: Vec2::Y,
            strength: 50.0,
        }),
        Box::new(RotationModifier { rotation_rate: 2.0 }),
        Box::new(VelocityColorModifier {
            stationary_color: HslColor::new(0.0, 1.0, 0.5),
            velocity_color: HslColor::new(60.0, 1.0, 0.5),
            velocity_threshold: 20.0,
        }),
        Box::new(AgeModifier::new(vec![Interpolator::Opacity {
            start: 1.0,
            end: 0.0,
        }])),
    ]
}

fn run(strategy: ExecutionStrategy, seed: u64) -> Vec<Particle> {
    let mut emitter = ParticleEmitter::builder("determinism")
        .capacity(5000)
        .lifespan(3.0)
        .profile(PointProfile)
        .parameters(ReleaseParameters {
            quantity: ValueRange::new(200, 400),
            speed: ValueRange::new(10.0, 40.0),
            ..ReleaseParameters::default()
        })
        .modifiers(busy_modifiers())
        .execution_strategy(strategy)
        .seed(seed)
        .build()
        .expect("Failed to build emitter");

    for frame in 0..60 {
        if frame % 5 == 0 {
            emitter.trigger(Vec2::new(100.0, 100.0), 0.0);
        }
        emitter.update(1.0 / 60.0, Vec2::ZERO);
    }

    emitter.particles().copied().collect()
}

#[test]
fn test_serial_runs_are_identical() {
    let first = run(ExecutionStrategy::Serial, 42);
    let second = run(ExecutionStrategy::Serial, 42);
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_parallel_matches_serial_over_many_frames() {
    let serial = run(ExecutionStrategy::Serial, 9);
    let parallel = run(ExecutionStrategy::Parallel, 9);
    assert!(serial.len() > particle_engine::PARALLEL_CHUNK_SIZE);
    assert_eq!(serial, parallel);
}

#[test]
fn test_auto_trigger_keeps_emitting() {
    let mut emitter = ParticleEmitter::builder("auto")
        .capacity(100)
        .lifespan(0.5)
        .profile(PointProfile)
        .parameters(fixed(2))
        .auto_trigger(0.1)
        .seed(8)
        .build()
        .expect("Failed to build emitter");

    for _ in 0..100 {
        emitter.update(0.05, Vec2::ZERO);
        assert!(emitter.active_particles() <= emitter.capacity());
    }

    // Steady state: five triggers of two particles live at any time
    let live = emitter.active_particles();
    assert!((8..=12).contains(&live), "live was {live}");
}

#[test]
fn test_capacity_change_resets_store() {
    let mut emitter = ParticleEmitter::new("resize", 16, 1.0, PointProfile)
        .expect("Failed to build emitter");
    emitter
        .set_parameters(fixed(10))
        .expect("parameters are valid");
    emitter.trigger(Vec2::ZERO, 0.0);
    emitter.update(0.1, Vec2::ZERO);

    emitter.set_capacity(32).expect("capacity is valid");
    assert_eq!(emitter.capacity(), 32);
    assert_eq!(emitter.active_particles(), 0);
    assert!(!emitter.update(0.1, Vec2::ZERO));

    assert_eq!(emitter.trigger(Vec2::ZERO, 0.0), 10);
}
