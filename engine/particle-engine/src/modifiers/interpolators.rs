//! Start/end interpolation of single particle channels

use glam::Vec2;

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

use crate::color::HslColor;
use crate::particle::Particle;

/// Drives one particle channel from a start value to an end value
///
/// The interpolation amount is supplied by the owning modifier (particle age
/// for [`AgeModifier`](super::AgeModifier), relative speed for
/// [`VelocityModifier`](super::VelocityModifier)). When several interpolators
/// write the same channel the last one in the list wins.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde-support",
    serde(tag = "channel", rename_all = "snake_case")
)]
pub enum Interpolator {
    /// Hue only, saturation and lightness untouched
    Hue { start: f32, end: f32 },
    /// Full HSL color
    Color { start: HslColor, end: HslColor },
    /// Opacity
    Opacity { start: f32, end: f32 },
    /// Rotation in radians
    Rotation { start: f32, end: f32 },
    /// Scale along each axis
    Scale { start: Vec2, end: Vec2 },
}

#[inline]
fn lerp(start: f32, end: f32, amount: f32) -> f32 {
    start + (end - start) * amount
}

impl Interpolator {
    /// Write the interpolated value for `amount` into `particle`
    #[inline]
    pub fn apply(&self, amount: f32, particle: &mut Particle) {
        match *self {
            Self::Hue { start, end } => particle.color.h = lerp(start, end, amount),
            Self::Color { start, end } => particle.color = start.lerp(end, amount),
            Self::Opacity { start, end } => particle.opacity = lerp(start, end, amount),
            Self::Rotation { start, end } => particle.rotation = lerp(start, end, amount),
            Self::Scale { start, end } => particle.scale = start.lerp(end, amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_channel() {
        let mut p = Particle::default();

        Interpolator::Hue {
            start: 0.0,
            end: 120.0,
        }
        .apply(0.5, &mut p);
        assert_eq!(p.color.h, 60.0);
        assert_eq!(p.color.l, 1.0);

        Interpolator::Opacity {
            start: 1.0,
            end: 0.0,
        }
        .apply(0.25, &mut p);
        assert_eq!(p.opacity, 0.75);

        Interpolator::Rotation {
            start: 0.0,
            end: 4.0,
        }
        .apply(0.5, &mut p);
        assert_eq!(p.rotation, 2.0);

        Interpolator::Scale {
            start: Vec2::ONE,
            end: Vec2::new(3.0, 5.0),
        }
        .apply(0.5, &mut p);
        assert_eq!(p.scale, Vec2::new(2.0, 3.0));

        Interpolator::Color {
            start: HslColor::BLACK,
            end: HslColor::new(100.0, 1.0, 1.0),
        }
        .apply(1.0, &mut p);
        assert_eq!(p.color, HslColor::new(100.0, 1.0, 1.0));
    }
}
