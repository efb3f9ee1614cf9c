//! Containment volumes centred on each particle's trigger origin

use glam::Vec2;

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

use super::Modifier;
use crate::buffer::ParticleCursor;

/// Reflect one axis of a particle back inside `[min, max]`
#[inline]
fn bounce_axis(position: &mut f32, velocity: &mut f32, min: f32, max: f32, restitution: f32) {
    if *position < min {
        *position = min + (min - *position);
        *velocity = -*velocity * restitution;
    } else if *position > max {
        *position = max - (*position - max);
        *velocity = -*velocity * restitution;
    }
}

/// Keeps particles inside a box, bouncing them off the walls
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct RectangleContainerModifier {
    /// Box width
    pub width: f32,
    /// Box height
    pub height: f32,
    /// Fraction of speed kept after a bounce
    pub restitution_coefficient: f32,
}

impl Modifier for RectangleContainerModifier {
    fn name(&self) -> &'static str {
        "rectangle_container"
    }

    fn update(&self, _elapsed_seconds: f32, particles: &mut ParticleCursor<'_>) {
        let half = Vec2::new(self.width, self.height) * 0.5;

        particles.for_each_mut(|p| {
            let min = p.trigger_origin - half;
            let max = p.trigger_origin + half;
            bounce_axis(
                &mut p.position.x,
                &mut p.velocity.x,
                min.x,
                max.x,
                self.restitution_coefficient,
            );
            bounce_axis(
                &mut p.position.y,
                &mut p.velocity.y,
                min.y,
                max.y,
                self.restitution_coefficient,
            );
        });
    }
}

/// Wraps particles that leave a box around to the opposite side
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct RectangleLoopContainerModifier {
    /// Box width
    pub width: f32,
    /// Box height
    pub height: f32,
}

impl Modifier for RectangleLoopContainerModifier {
    fn name(&self) -> &'static str {
        "rectangle_loop_container"
    }

    fn update(&self, _elapsed_seconds: f32, particles: &mut ParticleCursor<'_>) {
        let size = Vec2::new(self.width, self.height);
        let half = size * 0.5;

        particles.for_each_mut(|p| {
            let min = p.trigger_origin - half;
            let max = p.trigger_origin + half;

            if p.position.x < min.x {
                p.position.x += size.x;
            } else if p.position.x > max.x {
                p.position.x -= size.x;
            }

            if p.position.y < min.y {
                p.position.y += size.y;
            } else if p.position.y > max.y {
                p.position.y -= size.y;
            }
        });
    }
}

/// Keeps particles inside (or outside) a circle
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct CircleContainerModifier {
    /// Circle radius
    pub radius: f32,
    /// Contain inside the circle when true, keep out of it otherwise
    pub inside: bool,
    /// Fraction of normal speed kept after a bounce
    pub restitution_coefficient: f32,
}

impl Modifier for CircleContainerModifier {
    fn name(&self) -> &'static str {
        "circle_container"
    }

    fn update(&self, _elapsed_seconds: f32, particles: &mut ParticleCursor<'_>) {
        let radius_sq = self.radius * self.radius;

        particles.for_each_mut(|p| {
            let local = p.position - p.trigger_origin;
            let distance_sq = local.length_squared();

            let escaped = if self.inside {
                distance_sq > radius_sq
            } else {
                distance_sq < radius_sq
            };
            if !escaped || distance_sq <= f32::EPSILON {
                return;
            }

            let outward = local / distance_sq.sqrt();
            // Wall normal pointing back into the allowed region
            let normal = if self.inside { -outward } else { outward };

            p.position = p.trigger_origin + outward * self.radius;

            let approach = p.velocity.dot(normal);
            if approach < 0.0 {
                p.velocity -= normal * (approach * (1.0 + self.restitution_coefficient));
            }
        });
    }
}
