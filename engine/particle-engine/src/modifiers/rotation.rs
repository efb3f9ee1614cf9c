//! Constant angular velocity

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

use super::Modifier;
use crate::buffer::ParticleCursor;

/// Spins every particle at a fixed rate
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct RotationModifier {
    /// Radians per second
    pub rotation_rate: f32,
}

impl Modifier for RotationModifier {
    fn name(&self) -> &'static str {
        "rotation"
    }

    fn update(&self, elapsed_seconds: f32, particles: &mut ParticleCursor<'_>) {
        let delta = self.rotation_rate * elapsed_seconds;
        particles.for_each_mut(|p| p.rotation += delta);
    }
}
