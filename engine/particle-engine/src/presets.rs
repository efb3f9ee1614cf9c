//! Built-in effect definitions

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;

use crate::color::HslColor;
use crate::definition::{EffectDefinition, EmitterDefinition, ModifierDefinition, ProfileDefinition};
use crate::emitter::{ReleaseParameters, ScaleRange};
use crate::error::{ParticleError, Result};
use crate::modifiers::{
    AgeModifier, DragModifier, Interpolator, LinearGravityModifier, RotationModifier,
    VelocityColorModifier,
};
use crate::profile::{CircleProfile, CircleRadiation, SprayProfile};
use crate::range::{ColorRange, ValueRange};

/// Names accepted by [`preset`]
pub const PRESET_NAMES: &[&str] = &["fountain", "smoke", "sparks"];

/// Look up a built-in effect by name
pub fn preset(name: &str) -> Result<EffectDefinition> {
    match name {
        "fountain" => Ok(fountain()),
        "smoke" => Ok(smoke()),
        "sparks" => Ok(sparks()),
        _ => Err(ParticleError::UnknownPreset(name.to_string())),
    }
}

/// Water thrown upward in a narrow cone, falling back under gravity
pub fn fountain() -> EffectDefinition {
    EffectDefinition {
        name: "fountain".to_string(),
        position: Vec2::ZERO,
        emitters: vec![EmitterDefinition {
            name: "water".to_string(),
            capacity: 4000,
            lifespan: 2.5,
            auto_trigger: Some(0.02),
            profile: Some(ProfileDefinition::Spray(SprayProfile {
                direction: Vec2::NEG_Y,
                spread: PI / 8.0,
            })),
            parameters: ReleaseParameters {
                quantity: ValueRange::new(10, 20),
                speed: ValueRange::new(180.0, 240.0),
                color: ColorRange::new(
                    HslColor::new(200.0, 0.8, 0.55),
                    HslColor::new(215.0, 0.9, 0.7),
                ),
                opacity: ValueRange::new(0.7, 1.0),
                scale: ScaleRange::Uniform(ValueRange::new(0.5, 1.0)),
                ..ReleaseParameters::default()
            },
            modifiers: vec![
                ModifierDefinition::LinearGravity(LinearGravityModifier {
                    direction: Vec2::Y,
                    strength: 200.0,
                }),
                ModifierDefinition::Age(AgeModifier::new(vec![Interpolator::Opacity {
                    start: 1.0,
                    end: 0.0,
                }])),
            ],
            ..EmitterDefinition::default()
        }],
    }
}

/// Slow grey puffs that grow and rise
pub fn smoke() -> EffectDefinition {
    EffectDefinition {
        name: "smoke".to_string(),
        position: Vec2::ZERO,
        emitters: vec![EmitterDefinition {
            name: "plume".to_string(),
            capacity: 1500,
            lifespan: 4.0,
            auto_trigger: Some(0.05),
            profile: Some(ProfileDefinition::Circle(CircleProfile {
                radius: 12.0,
                radiate: CircleRadiation::Out,
            })),
            parameters: ReleaseParameters {
                quantity: ValueRange::new(2, 5),
                speed: ValueRange::new(5.0, 20.0),
                color: ColorRange::constant(HslColor::new(0.0, 0.0, 0.45)),
                opacity: ValueRange::new(0.3, 0.6),
                ..ReleaseParameters::default()
            },
            modifiers: vec![
                ModifierDefinition::LinearGravity(LinearGravityModifier {
                    direction: Vec2::NEG_Y,
                    strength: 15.0,
                }),
                ModifierDefinition::Drag(DragModifier {
                    drag_coefficient: 0.47,
                    density: 0.2,
                }),
                ModifierDefinition::Rotation(RotationModifier { rotation_rate: 0.5 }),
                ModifierDefinition::Age(AgeModifier::new(vec![
                    Interpolator::Scale {
                        start: Vec2::splat(1.0),
                        end: Vec2::splat(4.0),
                    },
                    Interpolator::Opacity {
                        start: 0.6,
                        end: 0.0,
                    },
                ])),
            ],
            ..EmitterDefinition::default()
        }],
    }
}

/// Fast bursts of hot sparks that cool as they slow down
///
/// Not auto-triggered; call [`ParticleEffect::trigger`](crate::ParticleEffect::trigger)
/// for each burst.
pub fn sparks() -> EffectDefinition {
    EffectDefinition {
        name: "sparks".to_string(),
        position: Vec2::ZERO,
        emitters: vec![
            EmitterDefinition {
                name: "sparks".to_string(),
                capacity: 2000,
                lifespan: 0.8,
                execution_strategy: "parallel".to_string(),
                profile: Some(ProfileDefinition::Point),
                parameters: ReleaseParameters {
                    quantity: ValueRange::new(80, 120),
                    speed: ValueRange::new(150.0, 400.0),
                    opacity: ValueRange::constant(1.0),
                    scale: ScaleRange::Independent {
                        x: ValueRange::new(2.0, 3.0),
                        y: ValueRange::constant(0.5),
                    },
                    ..ReleaseParameters::default()
                },
                modifiers: vec![
                    ModifierDefinition::Drag(DragModifier {
                        drag_coefficient: 1.0,
                        density: 2.5,
                    }),
                    ModifierDefinition::LinearGravity(LinearGravityModifier {
                        direction: Vec2::Y,
                        strength: 300.0,
                    }),
                    ModifierDefinition::VelocityColor(VelocityColorModifier {
                        stationary_color: HslColor::new(10.0, 1.0, 0.3),
                        velocity_color: HslColor::new(50.0, 1.0, 0.8),
                        velocity_threshold: 250.0,
                    }),
                    ModifierDefinition::OpacityFastFade,
                ],
                ..EmitterDefinition::default()
            },
            EmitterDefinition {
                name: "flash".to_string(),
                capacity: 16,
                lifespan: 0.15,
                profile: Some(ProfileDefinition::Point),
                parameters: ReleaseParameters {
                    quantity: ValueRange::constant(1),
                    speed: ValueRange::constant(0.0),
                    color: ColorRange::constant(HslColor::new(45.0, 1.0, 0.9)),
                    opacity: ValueRange::constant(1.0),
                    scale: ScaleRange::Uniform(ValueRange::constant(6.0)),
                    rotation: ValueRange::new(-FRAC_PI_2, FRAC_PI_2),
                    ..ReleaseParameters::default()
                },
                modifiers: vec![ModifierDefinition::OpacityFastFade],
                layer_depth: 0.1,
                ..EmitterDefinition::default()
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_preset_builds() {
        for name in PRESET_NAMES {
            let definition = preset(name).unwrap();
            assert_eq!(definition.name, *name);
            let mut effect = definition.build().unwrap();
            effect.trigger();
            assert!(effect.active_particles() > 0, "{name} released nothing");
            assert!(effect.update(1.0 / 60.0));
        }
    }

    #[test]
    fn test_unknown_preset() {
        assert!(matches!(
            preset("rain"),
            Err(ParticleError::UnknownPreset(name)) if name == "rain"
        ));
    }

    #[test]
    fn test_auto_triggered_presets_fill_up() {
        let mut effect = fountain().build().unwrap();
        for _ in 0..30 {
            effect.update(1.0 / 60.0);
        }
        assert!(effect.active_particles() > 100);
    }
}
