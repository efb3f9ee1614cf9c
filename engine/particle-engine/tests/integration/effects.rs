//! Effects assembled from definitions and presets.

use glam::Vec2;
use particle_engine::presets::{self, PRESET_NAMES};
use particle_engine::{ExecutionStrategy, ParticleError};

#[test]
fn test_presets_run_for_a_few_seconds() {
    for name in PRESET_NAMES {
        let mut definition = presets::preset(name).expect("preset exists");
        definition.reseed(1234);
        let capacity = definition.total_capacity();
        let mut effect = definition.build().expect("preset builds");
        effect.position = Vec2::new(400.0, 300.0);

        for frame in 0..180 {
            if frame % 30 == 0 {
                effect.trigger();
            }
            effect.update(1.0 / 60.0);
            assert!(effect.active_particles() <= capacity);
        }

        let vertices: usize = effect.emitters().iter().map(|e| e.render_data().len()).sum();
        assert_eq!(vertices, effect.active_particles());
    }
}

#[test]
fn test_strategy_override_does_not_change_results() {
    let build = |strategy: ExecutionStrategy| {
        let mut definition = presets::sparks();
        definition.reseed(5);
        definition.set_execution_strategy(strategy);
        let mut effect = definition.build().expect("preset builds");
        for _ in 0..20 {
            effect.trigger();
            effect.update(1.0 / 30.0);
        }
        effect
            .emitters()
            .iter()
            .flat_map(|e| e.particles().copied())
            .collect::<Vec<_>>()
    };

    assert_eq!(
        build(ExecutionStrategy::Serial),
        build(ExecutionStrategy::Parallel)
    );
}

#[test]
fn test_unknown_preset_is_reported() {
    let error = presets::preset("confetti").unwrap_err();
    assert!(matches!(error, ParticleError::UnknownPreset(_)));
    assert_eq!(error.to_string(), "Unknown preset 'confetti'");
}

#[cfg(feature = "serde-support")]
#[test]
fn test_presets_survive_json() {
    use particle_engine::EffectDefinition;

    for name in PRESET_NAMES {
        let definition = presets::preset(name).expect("preset exists");
        let json = definition.to_json_pretty().expect("serializes");
        let parsed = EffectDefinition::from_json(&json).expect("parses");
        pretty_assertions::assert_eq!(parsed, definition);
    }
}

#[cfg(feature = "serde-support")]
#[test]
fn test_invalid_json_definition_fails_to_build() {
    use particle_engine::EffectDefinition;

    let json = r#"{
        "name": "broken",
        "emitters": [
            { "name": "no-lifespan", "lifespan": 0.0, "profile": { "type": "point" } }
        ]
    }"#;

    let definition = EffectDefinition::from_json(json).expect("parses");
    assert!(matches!(
        definition.build(),
        Err(ParticleError::InvalidLifespan(_))
    ));
}
