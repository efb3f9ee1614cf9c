//! Modifiers keyed on particle speed

use glam::Vec2;

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

use super::{Interpolator, Modifier};
use crate::buffer::ParticleCursor;
use crate::color::HslColor;

/// Speed relative to `threshold`, saturating at 1
///
/// Compares squared magnitudes first so particles at or above the threshold
/// never pay for a square root. `threshold` must be non-negative.
#[inline]
fn speed_fraction(velocity: Vec2, threshold: f32, threshold_sq: f32) -> f32 {
    let speed_sq = velocity.length_squared();
    if speed_sq >= threshold_sq {
        1.0
    } else {
        speed_sq.sqrt() / threshold
    }
}

/// Blends between a resting color and a moving color by speed
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct VelocityColorModifier {
    /// Color of a particle at rest
    pub stationary_color: HslColor,
    /// Color of a particle at or above the threshold speed
    pub velocity_color: HslColor,
    /// Speed at which the moving color is fully applied, sign is ignored
    pub velocity_threshold: f32,
}

impl Modifier for VelocityColorModifier {
    fn name(&self) -> &'static str {
        "velocity_color"
    }

    fn update(&self, _elapsed_seconds: f32, particles: &mut ParticleCursor<'_>) {
        let threshold = self.velocity_threshold.abs();
        let threshold_sq = threshold * threshold;

        particles.for_each_mut(|p| {
            let t = speed_fraction(p.velocity, threshold, threshold_sq);
            p.color = if t >= 1.0 {
                self.velocity_color
            } else {
                self.stationary_color.lerp(self.velocity_color, t)
            };
        });
    }
}

/// Runs a list of interpolators with each particle's relative speed
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct VelocityModifier {
    /// Applied in order, later entries overwrite earlier ones
    pub interpolators: Vec<Interpolator>,
    /// Speed at which interpolators reach their end values, sign is ignored
    pub velocity_threshold: f32,
}

impl Modifier for VelocityModifier {
    fn name(&self) -> &'static str {
        "velocity"
    }

    fn update(&self, _elapsed_seconds: f32, particles: &mut ParticleCursor<'_>) {
        if self.interpolators.is_empty() {
            return;
        }
        let threshold = self.velocity_threshold.abs();
        let threshold_sq = threshold * threshold;

        particles.for_each_mut(|p| {
            let t = speed_fraction(p.velocity, threshold, threshold_sq);
            for interpolator in &self.interpolators {
                interpolator.apply(t, p);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifiers::test_support::{buffer_with, live};
    use crate::particle::Particle;

    fn moving(speed: f32) -> Particle {
        Particle {
            velocity: Vec2::new(0.0, speed),
            ..Particle::default()
        }
    }

    #[test]
    fn test_velocity_color_blend() {
        let mut buffer = buffer_with(&[moving(0.0), moving(5.0), moving(10.0), moving(25.0)]);
        let modifier = VelocityColorModifier {
            stationary_color: HslColor::new(0.0, 0.0, 0.0),
            velocity_color: HslColor::new(200.0, 1.0, 1.0),
            velocity_threshold: 10.0,
        };

        modifier.update(0.016, &mut buffer.cursor());

        let colors: Vec<HslColor> = live(&buffer).iter().map(|p| p.color).collect();
        assert_eq!(colors[0], HslColor::new(0.0, 0.0, 0.0));
        assert_eq!(colors[1], HslColor::new(100.0, 0.5, 0.5));
        assert_eq!(colors[2], HslColor::new(200.0, 1.0, 1.0));
        assert_eq!(colors[3], HslColor::new(200.0, 1.0, 1.0));
    }

    #[test]
    fn test_velocity_interpolators() {
        let mut buffer = buffer_with(&[moving(2.0), moving(8.0)]);
        let modifier = VelocityModifier {
            interpolators: vec![Interpolator::Opacity {
                start: 0.0,
                end: 1.0,
            }],
            velocity_threshold: 4.0,
        };

        modifier.update(0.016, &mut buffer.cursor());

        let opacities: Vec<f32> = live(&buffer).iter().map(|p| p.opacity).collect();
        assert_eq!(opacities, vec![0.5, 1.0]);
    }

    #[test]
    fn test_negative_threshold_uses_magnitude() {
        let mut buffer = buffer_with(&[moving(0.0), moving(5.0), moving(25.0)]);
        let modifier = VelocityColorModifier {
            stationary_color: HslColor::new(0.0, 0.0, 0.0),
            velocity_color: HslColor::new(200.0, 1.0, 1.0),
            velocity_threshold: -10.0,
        };
        modifier.update(0.016, &mut buffer.cursor());

        let colors: Vec<HslColor> = live(&buffer).iter().map(|p| p.color).collect();
        assert_eq!(colors[0], HslColor::new(0.0, 0.0, 0.0));
        assert_eq!(colors[1], HslColor::new(100.0, 0.5, 0.5));
        assert_eq!(colors[2], HslColor::new(200.0, 1.0, 1.0));

        let mut buffer = buffer_with(&[moving(2.0), moving(8.0)]);
        let modifier = VelocityModifier {
            interpolators: vec![Interpolator::Opacity {
                start: 0.0,
                end: 1.0,
            }],
            velocity_threshold: -4.0,
        };
        modifier.update(0.016, &mut buffer.cursor());

        let opacities: Vec<f32> = live(&buffer).iter().map(|p| p.opacity).collect();
        assert_eq!(opacities, vec![0.5, 1.0]);
    }
}
