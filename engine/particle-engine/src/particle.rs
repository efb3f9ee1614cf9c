//! Individual particle representation

use glam::Vec2;

use crate::color::HslColor;

/// A single particle slot in a [`ParticleBuffer`](crate::ParticleBuffer)
///
/// Plain fixed-layout data with no behaviour of its own. Slots are reused
/// once reclaimed, so every field is overwritten when a particle is released.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Particle {
    /// Normalised lifetime fraction, `[0, 1)` while live
    pub age: f32,
    /// Emitter time in seconds at which the particle was spawned
    pub inception: f32,
    /// Current position
    pub position: Vec2,
    /// Position of the trigger that spawned this particle
    pub trigger_origin: Vec2,
    /// Velocity in units per second
    pub velocity: Vec2,
    /// Current color
    pub color: HslColor,
    /// Opacity (0.0-1.0)
    pub opacity: f32,
    /// Scale along each axis
    pub scale: Vec2,
    /// Rotation in radians
    pub rotation: f32,
    /// Mass used by force-based modifiers
    pub mass: f32,
    /// Render layer depth
    pub layer_depth: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            age: 0.0,
            inception: 0.0,
            position: Vec2::ZERO,
            trigger_origin: Vec2::ZERO,
            velocity: Vec2::ZERO,
            color: HslColor::WHITE,
            opacity: 1.0,
            scale: Vec2::ONE,
            rotation: 0.0,
            mass: 1.0,
            layer_depth: 0.0,
        }
    }
}

impl Particle {
    /// Create a particle at rest at `position`
    pub fn new(position: Vec2, velocity: Vec2, inception: f32) -> Self {
        Self {
            position,
            trigger_origin: position,
            velocity,
            inception,
            ..Self::default()
        }
    }

    /// Seconds since the particle was spawned
    #[inline]
    pub fn elapsed(&self, now: f32) -> f32 {
        now - self.inception
    }

    /// Whether the particle has outlived `lifespan` seconds at time `now`
    #[inline]
    pub fn is_expired(&self, now: f32, lifespan: f32) -> bool {
        self.elapsed(now) >= lifespan
    }

    /// Recompute the normalised age and integrate position
    #[inline]
    pub fn advance(&mut self, now: f32, lifespan: f32, dt: f32) {
        self.age = self.elapsed(now) / lifespan;
        self.position += self.velocity * dt;
    }

    /// RGBA color with opacity in the alpha channel
    pub fn rgba(&self) -> [f32; 4] {
        let [r, g, b] = self.color.to_rgb();
        [r, g, b, self.opacity]
    }
}

/// What a renderer needs to draw one particle as a textured quad
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct ParticleVertex {
    /// Quad center
    pub position: [f32; 2],
    /// Rotation in radians
    pub rotation: f32,
    /// Scale along each axis
    pub scale: [f32; 2],
    /// RGBA tint, alpha is the particle opacity
    pub color: [f32; 4],
    /// Render layer depth
    pub layer_depth: f32,
}

impl From<&Particle> for ParticleVertex {
    fn from(particle: &Particle) -> Self {
        Self {
            position: particle.position.to_array(),
            rotation: particle.rotation,
            scale: particle.scale.to_array(),
            color: particle.rgba(),
            layer_depth: particle.layer_depth,
        }
    }
}
