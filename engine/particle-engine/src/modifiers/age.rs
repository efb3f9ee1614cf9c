//! Attribute interpolation keyed on particle age

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

use super::{Interpolator, Modifier};
use crate::buffer::ParticleCursor;

/// Runs a list of interpolators with each particle's normalised age
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct AgeModifier {
    /// Applied in order, later entries overwrite earlier ones
    pub interpolators: Vec<Interpolator>,
}

impl AgeModifier {
    /// Create a modifier from its interpolators
    pub fn new(interpolators: Vec<Interpolator>) -> Self {
        Self { interpolators }
    }
}

impl Modifier for AgeModifier {
    fn name(&self) -> &'static str {
        "age"
    }

    fn update(&self, _elapsed_seconds: f32, particles: &mut ParticleCursor<'_>) {
        if self.interpolators.is_empty() {
            return;
        }

        particles.for_each_mut(|p| {
            let age = p.age;
            for interpolator in &self.interpolators {
                interpolator.apply(age, p);
            }
        });
    }
}
