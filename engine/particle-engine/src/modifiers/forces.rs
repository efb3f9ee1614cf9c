//! Force-based modifiers acting on particle velocity

use glam::Vec2;

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

use super::Modifier;
use crate::buffer::ParticleCursor;

/// Constant acceleration along a fixed direction, scaled by particle mass
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct LinearGravityModifier {
    /// Direction of the pull
    pub direction: Vec2,
    /// Acceleration in units per second squared
    pub strength: f32,
}

impl Default for LinearGravityModifier {
    fn default() -> Self {
        Self {
            direction: Vec2::Y,
            strength: 9.8,
        }
    }
}

impl Modifier for LinearGravityModifier {
    fn name(&self) -> &'static str {
        "linear_gravity"
    }

    fn update(&self, elapsed_seconds: f32, particles: &mut ParticleCursor<'_>) {
        let impulse = self.direction * (self.strength * elapsed_seconds);
        particles.for_each_mut(|p| p.velocity += impulse * p.mass);
    }
}

/// Velocity damping proportional to mass and medium density
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct DragModifier {
    /// Drag coefficient of the particle shape
    pub drag_coefficient: f32,
    /// Density of the surrounding medium
    pub density: f32,
}

impl Default for DragModifier {
    fn default() -> Self {
        Self {
            drag_coefficient: 0.47,
            density: 0.5,
        }
    }
}

impl Modifier for DragModifier {
    fn name(&self) -> &'static str {
        "drag"
    }

    fn update(&self, elapsed_seconds: f32, particles: &mut ParticleCursor<'_>) {
        let factor = -self.drag_coefficient * self.density * elapsed_seconds;
        particles.for_each_mut(|p| {
            let drag = factor * p.mass;
            p.velocity += p.velocity * drag;
        });
    }
}

/// Gravitational constant tuned for screen-space units
const VORTEX_GRAVITY: f32 = 100_000.0;

/// Inverse-square attraction toward a point relative to each trigger origin
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct VortexModifier {
    /// Attractor position relative to the trigger origin
    pub position: Vec2,
    /// Attractor mass
    pub mass: f32,
    /// Speed cap, zero disables the cap
    pub max_speed: f32,
}

impl Default for VortexModifier {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            mass: 1.0,
            max_speed: 0.0,
        }
    }
}

impl Modifier for VortexModifier {
    fn name(&self) -> &'static str {
        "vortex"
    }

    fn update(&self, elapsed_seconds: f32, particles: &mut ParticleCursor<'_>) {
        let pull = VORTEX_GRAVITY * self.mass * elapsed_seconds;
        let max_speed_sq = self.max_speed * self.max_speed;

        particles.for_each_mut(|p| {
            let diff = self.position + p.trigger_origin - p.position;
            let distance_sq = diff.length_squared();
            if distance_sq <= f32::EPSILON {
                return;
            }

            p.velocity += diff.normalize() * (pull / distance_sq);

            if max_speed_sq > 0.0 && p.velocity.length_squared() > max_speed_sq {
                p.velocity = p.velocity.normalize() * self.max_speed;
            }
        });
    }
}
