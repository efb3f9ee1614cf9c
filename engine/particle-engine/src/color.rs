//! Hue/saturation/lightness colors used for particle tinting

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

/// A color in HSL space
///
/// Hue is measured in degrees and is not wrapped automatically, so that
/// interpolating between two hues moves linearly through the values given.
/// Saturation and lightness are in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct HslColor {
    /// Hue in degrees
    pub h: f32,
    /// Saturation (0.0-1.0)
    pub s: f32,
    /// Lightness (0.0-1.0)
    pub l: f32,
}

impl HslColor {
    /// Pure white
    pub const WHITE: Self = Self::new(0.0, 0.0, 1.0);
    /// Pure black
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a color from its components
    pub const fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    /// Linear interpolation of every channel, `t = 0` yields `self`
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            h: self.h + (other.h - self.h) * t,
            s: self.s + (other.s - self.s) * t,
            l: self.l + (other.l - self.l) * t,
        }
    }

    /// Convert to linear RGB components in `[0, 1]`
    pub fn to_rgb(self) -> [f32; 3] {
        let s = self.s.clamp(0.0, 1.0);
        let l = self.l.clamp(0.0, 1.0);
        if s <= 0.0 {
            return [l, l, l];
        }

        let h = self.h.rem_euclid(360.0) / 60.0;
        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - chroma * 0.5;

        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        [r + m, g + m, b + m]
    }

    /// Convert from RGB components in `[0, 1]`
    pub fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) * 0.5;
        let delta = max - min;

        if delta <= f32::EPSILON {
            return Self::new(0.0, 0.0, l);
        }

        let s = delta / (1.0 - (2.0 * l - 1.0).abs());
        let h = if (max - r).abs() <= f32::EPSILON {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if (max - g).abs() <= f32::EPSILON {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };

        Self::new(h, s, l)
    }
}
