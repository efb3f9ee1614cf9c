//! Inclusive value ranges sampled when particles are released

use rand::Rng;

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

use crate::ParticleRng;
use crate::color::HslColor;
use crate::error::{ParticleError, Result};

/// An inclusive `[min, max]` range of values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct ValueRange<T> {
    /// Lower bound
    pub min: T,
    /// Upper bound
    pub max: T,
}

impl<T: Copy> ValueRange<T> {
    /// Create a range from its bounds
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// A range that always yields `value`
    pub const fn constant(value: T) -> Self {
        Self {
            min: value,
            max: value,
        }
    }
}

impl ValueRange<f32> {
    /// Draw a value uniformly from the range
    #[inline]
    pub fn sample(&self, rng: &mut ParticleRng) -> f32 {
        self.min + (self.max - self.min) * rng.random::<f32>()
    }

    /// Reject ranges whose bounds are inverted or not finite
    pub fn validate(&self, name: &'static str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(ParticleError::InvalidRange {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

impl ValueRange<u32> {
    /// Draw a count uniformly from the range
    #[inline]
    pub fn sample(&self, rng: &mut ParticleRng) -> u32 {
        if self.max <= self.min {
            self.min
        } else {
            rng.random_range(self.min..=self.max)
        }
    }

    /// Reject ranges whose bounds are inverted
    pub fn validate(&self, name: &'static str) -> Result<()> {
        if self.min > self.max {
            return Err(ParticleError::InvalidRange {
                name,
                min: self.min as f32,
                max: self.max as f32,
            });
        }
        Ok(())
    }
}

impl From<f32> for ValueRange<f32> {
    fn from(value: f32) -> Self {
        Self::constant(value)
    }
}

impl From<u32> for ValueRange<u32> {
    fn from(value: u32) -> Self {
        Self::constant(value)
    }
}

/// Per-channel range of HSL colors
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct ColorRange {
    /// Lower bound for each channel
    pub min: HslColor,
    /// Upper bound for each channel
    pub max: HslColor,
}

impl ColorRange {
    /// Create a range between two colors
    pub const fn new(min: HslColor, max: HslColor) -> Self {
        Self { min, max }
    }

    /// A range that always yields `color`
    pub const fn constant(color: HslColor) -> Self {
        Self {
            min: color,
            max: color,
        }
    }

    /// Draw each channel independently
    #[inline]
    pub fn sample(&self, rng: &mut ParticleRng) -> HslColor {
        HslColor::new(
            ValueRange::new(self.min.h, self.max.h).sample(rng),
            ValueRange::new(self.min.s, self.max.s).sample(rng),
            ValueRange::new(self.min.l, self.max.l).sample(rng),
        )
    }
}

impl From<HslColor> for ColorRange {
    fn from(color: HslColor) -> Self {
        Self::constant(color)
    }
}
