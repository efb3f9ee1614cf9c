//! Emitter invariants over random frame sequences.

use glam::Vec2;
use particle_engine::{ParticleEmitter, PointProfile, ReleaseParameters, ValueRange};
use proptest::prelude::*;

fn emitter(capacity: usize, lifespan: f32, quantity: ValueRange<u32>, seed: u64) -> ParticleEmitter {
    ParticleEmitter::builder("property")
        .capacity(capacity)
        .lifespan(lifespan)
        .profile(PointProfile)
        .parameters(ReleaseParameters {
            quantity,
            ..ReleaseParameters::default()
        })
        .seed(seed)
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn live_count_never_exceeds_capacity(
        capacity in 1usize..64,
        max_quantity in 0u32..20,
        frames in prop::collection::vec((any::<bool>(), 0.001f32..0.5), 1..80),
        seed in any::<u64>(),
    ) {
        let mut emitter = emitter(capacity, 1.0, ValueRange::new(0, max_quantity), seed);

        for (trigger, dt) in frames {
            if trigger {
                let before = emitter.active_particles();
                let released = emitter.trigger(Vec2::ZERO, 0.0);
                prop_assert!(released <= capacity - before);
                prop_assert_eq!(emitter.active_particles(), before + released);
            }
            emitter.update(dt, Vec2::ZERO);
            prop_assert!(emitter.active_particles() <= capacity);
        }
    }

    #[test]
    fn expire_scan_removes_exactly_the_expired_prefix(
        lifespan in 0.2f32..2.0,
        gaps in prop::collection::vec(0.01f32..0.3, 1..30),
    ) {
        let mut emitter = emitter(256, lifespan, ValueRange::constant(1), 7);
        let mut spawned = Vec::new();

        for gap in gaps {
            spawned.push(emitter.total_seconds());
            emitter.trigger(Vec2::ZERO, 0.0);
            emitter.update(gap, Vec2::ZERO);

            let now = emitter.total_seconds();
            let expected: Vec<f32> = spawned
                .iter()
                .copied()
                .filter(|&t| now - t < lifespan)
                .collect();
            let inceptions: Vec<f32> = emitter.particles().map(|p| p.inception).collect();

            // Survivors are exactly the unexpired spawns, still in spawn order
            prop_assert_eq!(emitter.active_particles(), expected.len());
            prop_assert_eq!(inceptions, expected);
        }
    }
}
