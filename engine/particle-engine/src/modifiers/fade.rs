//! Opacity fading over a particle's lifetime

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

use super::Modifier;
use crate::buffer::ParticleCursor;

/// Fades opacity linearly from 1 at spawn to 0 at expiry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct OpacityFastFadeModifier;

impl Modifier for OpacityFastFadeModifier {
    fn name(&self) -> &'static str {
        "opacity_fast_fade"
    }

    fn update(&self, _elapsed_seconds: f32, particles: &mut ParticleCursor<'_>) {
        particles.for_each_mut(|p| p.opacity = 1.0 - p.age);
    }
}
