//! Named groups of emitters driven together

use glam::Vec2;

use crate::emitter::ParticleEmitter;

/// A set of emitters sharing one position
#[derive(Debug, Default)]
pub struct ParticleEffect {
    /// Effect name
    name: String,
    /// Position passed to every emitter on trigger and update
    pub position: Vec2,
    /// Owned emitters, updated in order
    emitters: Vec<ParticleEmitter>,
}

impl ParticleEffect {
    /// Create an empty effect
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: Vec2::ZERO,
            emitters: Vec::new(),
        }
    }

    /// Create an effect from existing emitters
    pub fn with_emitters(name: impl Into<String>, emitters: Vec<ParticleEmitter>) -> Self {
        Self {
            emitters,
            ..Self::new(name)
        }
    }

    /// Get the effect name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add an emitter
    pub fn add_emitter(&mut self, emitter: ParticleEmitter) {
        self.emitters.push(emitter);
    }

    /// Get the emitters
    pub fn emitters(&self) -> &[ParticleEmitter] {
        &self.emitters
    }

    /// Get the emitters for editing
    pub fn emitters_mut(&mut self) -> &mut [ParticleEmitter] {
        &mut self.emitters
    }

    /// Find an emitter by name
    pub fn emitter(&self, name: &str) -> Option<&ParticleEmitter> {
        self.emitters.iter().find(|e| e.name() == name)
    }

    /// Total live particles across all emitters
    pub fn active_particles(&self) -> usize {
        self.emitters.iter().map(ParticleEmitter::active_particles).sum()
    }

    /// Trigger every emitter at the effect position
    pub fn trigger(&mut self) -> usize {
        self.trigger_at(self.position)
    }

    /// Trigger every emitter at `position`, using each emitter's layer depth
    pub fn trigger_at(&mut self, position: Vec2) -> usize {
        self.emitters
            .iter_mut()
            .map(|emitter| {
                let layer_depth = emitter.layer_depth;
                emitter.trigger(position, layer_depth)
            })
            .sum()
    }

    /// Update every emitter, returning whether any of them is active
    pub fn update(&mut self, elapsed_seconds: f32) -> bool {
        let position = self.position;
        let mut active = false;
        for emitter in &mut self.emitters {
            active |= emitter.update(elapsed_seconds, position);
        }
        active
    }

    /// Drop all live particles of every emitter
    pub fn clear(&mut self) {
        for emitter in &mut self.emitters {
            emitter.clear();
        }
    }
}
