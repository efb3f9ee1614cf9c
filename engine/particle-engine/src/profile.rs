//! Spawn profiles: where new particles appear and which way they head

use std::f32::consts::TAU;
use std::fmt;

use glam::Vec2;
use rand::Rng;

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

use crate::ParticleRng;

/// Supplies the spawn offset and unit heading of each released particle
///
/// Called once per particle. The offset is relative to the trigger position.
pub trait Profile: fmt::Debug + Send + Sync {
    /// Sample an `(offset, heading)` pair
    fn offset_and_heading(&self, rng: &mut ParticleRng) -> (Vec2, Vec2);
}

/// Direction particles take relative to the center of a round profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-support", serde(rename_all = "snake_case"))]
pub enum CircleRadiation {
    /// Random heading
    #[default]
    None,
    /// Toward the center
    In,
    /// Away from the center
    Out,
}

impl CircleRadiation {
    fn heading(self, outward: Vec2, rng: &mut ParticleRng) -> Vec2 {
        match self {
            Self::None => random_unit(rng),
            Self::In => -outward,
            Self::Out => outward,
        }
    }
}

/// A uniformly distributed unit vector
#[inline]
pub(crate) fn random_unit(rng: &mut ParticleRng) -> Vec2 {
    Vec2::from_angle(rng.random::<f32>() * TAU)
}

/// Spawn everything at the trigger position
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct PointProfile;

impl Profile for PointProfile {
    fn offset_and_heading(&self, rng: &mut ParticleRng) -> (Vec2, Vec2) {
        (Vec2::ZERO, random_unit(rng))
    }
}

/// Spawn along a segment centred on the trigger position
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct LineProfile {
    /// Unit direction of the segment
    pub axis: Vec2,
    /// Segment length
    pub length: f32,
}

impl Profile for LineProfile {
    fn offset_and_heading(&self, rng: &mut ParticleRng) -> (Vec2, Vec2) {
        let along = (rng.random::<f32>() - 0.5) * self.length;
        (self.axis * along, random_unit(rng))
    }
}

/// Spawn on the edge of a circle
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct RingProfile {
    /// Ring radius
    pub radius: f32,
    /// Heading policy
    #[cfg_attr(feature = "serde-support", serde(default))]
    pub radiate: CircleRadiation,
}

impl Profile for RingProfile {
    fn offset_and_heading(&self, rng: &mut ParticleRng) -> (Vec2, Vec2) {
        let outward = random_unit(rng);
        (outward * self.radius, self.radiate.heading(outward, rng))
    }
}

/// Spawn anywhere inside a circle
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct CircleProfile {
    /// Circle radius
    pub radius: f32,
    /// Heading policy
    #[cfg_attr(feature = "serde-support", serde(default))]
    pub radiate: CircleRadiation,
}

impl Profile for CircleProfile {
    fn offset_and_heading(&self, rng: &mut ParticleRng) -> (Vec2, Vec2) {
        let distance = rng.random::<f32>() * self.radius;
        let outward = random_unit(rng);
        (outward * distance, self.radiate.heading(outward, rng))
    }
}

/// Spawn on the outline of an axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct BoxProfile {
    /// Box width
    pub width: f32,
    /// Box height
    pub height: f32,
}

impl Profile for BoxProfile {
    fn offset_and_heading(&self, rng: &mut ParticleRng) -> (Vec2, Vec2) {
        let half_w = self.width * 0.5;
        let half_h = self.height * 0.5;
        let along = rng.random::<f32>();

        let offset = match rng.random_range(0..4u8) {
            0 => Vec2::new(-half_w + along * self.width, -half_h),
            1 => Vec2::new(half_w, -half_h + along * self.height),
            2 => Vec2::new(-half_w + along * self.width, half_h),
            _ => Vec2::new(-half_w, -half_h + along * self.height),
        };

        (offset, random_unit(rng))
    }
}

/// Spawn anywhere inside an axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct BoxFillProfile {
    /// Box width
    pub width: f32,
    /// Box height
    pub height: f32,
}

impl Profile for BoxFillProfile {
    fn offset_and_heading(&self, rng: &mut ParticleRng) -> (Vec2, Vec2) {
        let offset = Vec2::new(
            (rng.random::<f32>() - 0.5) * self.width,
            (rng.random::<f32>() - 0.5) * self.height,
        );
        (offset, random_unit(rng))
    }
}

/// Spawn at the trigger position heading within a cone
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct SprayProfile {
    /// Center direction of the cone
    pub direction: Vec2,
    /// Full cone angle in radians
    pub spread: f32,
}

impl Profile for SprayProfile {
    fn offset_and_heading(&self, rng: &mut ParticleRng) -> (Vec2, Vec2) {
        let center = self.direction.to_angle();
        let angle = center + (rng.random::<f32>() - 0.5) * self.spread;
        (Vec2::ZERO, Vec2::from_angle(angle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const EPSILON: f32 = 1e-4;

    fn sample<P: Profile>(profile: &P, n: usize) -> Vec<(Vec2, Vec2)> {
        let mut rng = ParticleRng::seed_from_u64(99);
        (0..n).map(|_| profile.offset_and_heading(&mut rng)).collect()
    }

    #[test]
    fn test_headings_are_unit_vectors() {
        let profiles: Vec<Box<dyn Profile>> = vec![
            Box::new(PointProfile),
            Box::new(LineProfile {
                axis: Vec2::X,
                length: 10.0,
            }),
            Box::new(CircleProfile {
                radius: 5.0,
                radiate: CircleRadiation::None,
            }),
            Box::new(BoxFillProfile {
                width: 4.0,
                height: 2.0,
            }),
        ];

        let mut rng = ParticleRng::seed_from_u64(3);
        for profile in &profiles {
            for _ in 0..100 {
                let (_, heading) = profile.offset_and_heading(&mut rng);
                assert!((heading.length() - 1.0).abs() < EPSILON);
            }
        }
    }

    #[test]
    fn test_ring_radiates_outward() {
        let ring = RingProfile {
            radius: 3.0,
            radiate: CircleRadiation::Out,
        };
        for (offset, heading) in sample(&ring, 100) {
            assert!((offset.length() - 3.0).abs() < EPSILON);
            assert!((offset.normalize() - heading).length() < EPSILON);
        }

        let inward = RingProfile {
            radius: 3.0,
            radiate: CircleRadiation::In,
        };
        for (offset, heading) in sample(&inward, 100) {
            assert!((offset.normalize() + heading).length() < EPSILON);
        }
    }

    #[test]
    fn test_circle_stays_inside_radius() {
        let circle = CircleProfile {
            radius: 2.0,
            radiate: CircleRadiation::Out,
        };
        for (offset, _) in sample(&circle, 200) {
            assert!(offset.length() <= 2.0 + EPSILON);
        }
    }

    #[test]
    fn test_box_outline_and_fill() {
        let outline = BoxProfile {
            width: 4.0,
            height: 2.0,
        };
        for (offset, _) in sample(&outline, 200) {
            let on_vertical = (offset.x.abs() - 2.0).abs() < EPSILON;
            let on_horizontal = (offset.y.abs() - 1.0).abs() < EPSILON;
            assert!(on_vertical || on_horizontal, "{offset:?} not on outline");
        }

        let fill = BoxFillProfile {
            width: 4.0,
            height: 2.0,
        };
        for (offset, _) in sample(&fill, 200) {
            assert!(offset.x.abs() <= 2.0 && offset.y.abs() <= 1.0);
        }
    }

    #[test]
    fn test_spray_stays_in_cone() {
        let spray = SprayProfile {
            direction: Vec2::Y,
            spread: 0.5,
        };
        for (offset, heading) in sample(&spray, 200) {
            assert_eq!(offset, Vec2::ZERO);
            assert!(heading.angle_to(Vec2::Y).abs() <= 0.25 + EPSILON);
        }
    }

    #[test]
    fn test_line_offsets_lie_on_axis() {
        let line = LineProfile {
            axis: Vec2::Y,
            length: 6.0,
        };
        for (offset, _) in sample(&line, 200) {
            assert_eq!(offset.x, 0.0);
            assert!(offset.y.abs() <= 3.0);
        }
    }
}
