//! Particle emitter runtime state

use glam::Vec2;
use log::{debug, trace};
use rand::{Rng, SeedableRng};

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

use crate::ParticleRng;
use crate::buffer::ParticleBuffer;
use crate::color::HslColor;
use crate::error::{ParticleError, Result};
use crate::execution::ExecutionStrategy;
use crate::modifiers::Modifier;
use crate::particle::{Particle, ParticleVertex};
use crate::profile::Profile;
use crate::range::{ColorRange, ValueRange};

/// Upper bound on auto-trigger catch-up within a single update
///
/// A long frame (for example after resuming from a pause) would otherwise
/// fire one trigger per elapsed period and flood the buffer.
pub const MAX_AUTO_TRIGGERS_PER_UPDATE: u32 = 8;

/// Scale sampled for each released particle
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-support", serde(rename_all = "snake_case"))]
pub enum ScaleRange {
    /// One sample applied to both axes
    Uniform(ValueRange<f32>),
    /// Separate samples per axis
    Independent {
        /// Horizontal scale
        x: ValueRange<f32>,
        /// Vertical scale
        y: ValueRange<f32>,
    },
}

impl Default for ScaleRange {
    fn default() -> Self {
        Self::Uniform(ValueRange::constant(1.0))
    }
}

impl ScaleRange {
    fn sample(&self, rng: &mut ParticleRng) -> Vec2 {
        match self {
            Self::Uniform(range) => Vec2::splat(range.sample(rng)),
            Self::Independent { x, y } => Vec2::new(x.sample(rng), y.sample(rng)),
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            Self::Uniform(range) => range.validate("scale"),
            Self::Independent { x, y } => {
                x.validate("scale.x")?;
                y.validate("scale.y")
            }
        }
    }
}

/// Distributions sampled for every particle released by a trigger
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct ReleaseParameters {
    /// Particles requested per trigger
    pub quantity: ValueRange<u32>,
    /// Initial speed along the profile heading
    pub speed: ValueRange<f32>,
    /// Initial color
    pub color: ColorRange,
    /// Initial opacity
    pub opacity: ValueRange<f32>,
    /// Initial scale
    pub scale: ScaleRange,
    /// Initial rotation in radians
    pub rotation: ValueRange<f32>,
    /// Mass used by force modifiers
    pub mass: ValueRange<f32>,
}

impl Default for ReleaseParameters {
    fn default() -> Self {
        Self {
            quantity: ValueRange::constant(1),
            speed: ValueRange::new(-1.0, 1.0),
            color: ColorRange::constant(HslColor::WHITE),
            opacity: ValueRange::new(0.0, 1.0),
            scale: ScaleRange::default(),
            rotation: ValueRange::new(-std::f32::consts::PI, std::f32::consts::PI),
            mass: ValueRange::constant(1.0),
        }
    }
}

impl ReleaseParameters {
    /// Check every range for inverted or non-finite bounds
    pub fn validate(&self) -> Result<()> {
        self.quantity.validate("quantity")?;
        self.speed.validate("speed")?;
        ValueRange::new(self.color.min.h, self.color.max.h).validate("color.h")?;
        ValueRange::new(self.color.min.s, self.color.max.s).validate("color.s")?;
        ValueRange::new(self.color.min.l, self.color.max.l).validate("color.l")?;
        self.opacity.validate("opacity")?;
        self.scale.validate()?;
        self.rotation.validate("rotation")?;
        self.mass.validate("mass")
    }
}

fn validate_lifespan(lifespan: f32) -> Result<()> {
    if lifespan.is_finite() && lifespan > 0.0 {
        Ok(())
    } else {
        Err(ParticleError::InvalidLifespan(lifespan))
    }
}

fn validate_auto_trigger(period: Option<f32>) -> Result<()> {
    match period {
        Some(period) if !(period.is_finite() && period > 0.0) => {
            Err(ParticleError::InvalidParameter {
                name: "auto_trigger",
                reason: format!("period must be positive and finite, got {period}"),
            })
        }
        _ => Ok(()),
    }
}

/// Runtime particle emitter
///
/// Owns one [`ParticleBuffer`] exclusively. Triggers release batches of
/// particles into it; [`update`](Self::update) ages them, reclaims the
/// expired ones and runs the modifier list.
#[derive(Debug)]
pub struct ParticleEmitter {
    /// Emitter name
    name: String,
    /// Particle storage
    buffer: ParticleBuffer,
    /// Particle lifespan in seconds
    lifespan: f32,
    /// Spawn shape
    profile: Box<dyn Profile>,
    /// Per-particle release distributions
    parameters: ReleaseParameters,
    /// Modifiers run every update, in order
    modifiers: Vec<Box<dyn Modifier>>,
    /// How the modifiers are run
    pub execution_strategy: ExecutionStrategy,
    /// Offset added to every trigger position
    pub offset: Vec2,
    /// Layer depth used by auto-triggers
    pub layer_depth: f32,
    /// Auto-trigger period in seconds, `None` when disabled
    auto_trigger: Option<f32>,
    /// Countdown to the next auto-trigger
    next_auto_trigger: f32,
    /// Simulation clock
    total_seconds: f32,
    /// Random number generator
    rng: ParticleRng,
}

impl ParticleEmitter {
    /// Create an emitter with default release parameters and no modifiers
    pub fn new(
        name: impl Into<String>,
        capacity: usize,
        lifespan: f32,
        profile: impl Profile + 'static,
    ) -> Result<Self> {
        Self::builder(name)
            .capacity(capacity)
            .lifespan(lifespan)
            .profile(profile)
            .build()
    }

    /// Start building an emitter
    pub fn builder(name: impl Into<String>) -> ParticleEmitterBuilder {
        ParticleEmitterBuilder::new(name)
    }

    /// Get the emitter name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the maximum number of live particles
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Replace the buffer with an empty one of a different size
    ///
    /// Live particles are discarded, not migrated.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<()> {
        let buffer = ParticleBuffer::new(capacity)?;
        let mut old = std::mem::replace(&mut self.buffer, buffer);
        debug!(
            "Emitter '{}' capacity {} -> {}, discarded {} live particles",
            self.name,
            old.capacity(),
            capacity,
            old.count()
        );
        old.dispose();
        Ok(())
    }

    /// Get the particle lifespan in seconds
    pub fn lifespan(&self) -> f32 {
        self.lifespan
    }

    /// Change the particle lifespan
    pub fn set_lifespan(&mut self, lifespan: f32) -> Result<()> {
        validate_lifespan(lifespan)?;
        self.lifespan = lifespan;
        Ok(())
    }

    /// Get the release distributions
    pub fn parameters(&self) -> &ReleaseParameters {
        &self.parameters
    }

    /// Replace the release distributions
    pub fn set_parameters(&mut self, parameters: ReleaseParameters) -> Result<()> {
        parameters.validate()?;
        self.parameters = parameters;
        Ok(())
    }

    /// Get the auto-trigger period
    pub fn auto_trigger(&self) -> Option<f32> {
        self.auto_trigger
    }

    /// Enable auto-triggering every `period` seconds, or disable with `None`
    pub fn set_auto_trigger(&mut self, period: Option<f32>) -> Result<()> {
        validate_auto_trigger(period)?;
        self.auto_trigger = period;
        self.next_auto_trigger = 0.0;
        Ok(())
    }

    /// Get the spawn profile
    pub fn profile(&self) -> &dyn Profile {
        self.profile.as_ref()
    }

    /// Replace the spawn profile
    pub fn set_profile(&mut self, profile: impl Profile + 'static) {
        self.profile = Box::new(profile);
    }

    /// Get the modifier list
    pub fn modifiers(&self) -> &[Box<dyn Modifier>] {
        &self.modifiers
    }

    /// Get the modifier list for editing
    pub fn modifiers_mut(&mut self) -> &mut Vec<Box<dyn Modifier>> {
        &mut self.modifiers
    }

    /// Append a modifier to the list
    pub fn add_modifier(&mut self, modifier: impl Modifier + 'static) {
        self.modifiers.push(Box::new(modifier));
    }

    /// Get the current number of particles
    pub fn active_particles(&self) -> usize {
        self.buffer.count()
    }

    /// Seconds simulated since creation
    pub fn total_seconds(&self) -> f32 {
        self.total_seconds
    }

    /// Read access to the particle storage
    pub fn buffer(&self) -> &ParticleBuffer {
        &self.buffer
    }

    /// Iterate live particles from oldest to newest
    pub fn particles(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.buffer.iter()
    }

    /// Release a batch of particles around `position`
    ///
    /// Returns how many particles were actually released, which is less than
    /// the sampled quantity when the buffer is saturated.
    pub fn trigger(&mut self, position: Vec2, layer_depth: f32) -> usize {
        let origin = position + self.offset;
        let quantity = self.parameters.quantity.sample(&mut self.rng) as usize;
        self.release(quantity, layer_depth, |_| origin)
    }

    /// Release a batch of particles spread uniformly along a segment
    pub fn trigger_along(&mut self, start: Vec2, end: Vec2, layer_depth: f32) -> usize {
        let start = start + self.offset;
        let end = end + self.offset;
        let quantity = self.parameters.quantity.sample(&mut self.rng) as usize;
        self.release(quantity, layer_depth, |rng| start.lerp(end, rng.random::<f32>()))
    }

    fn release<F>(&mut self, quantity: usize, layer_depth: f32, mut origin: F) -> usize
    where
        F: FnMut(&mut ParticleRng) -> Vec2,
    {
        let Self {
            buffer,
            profile,
            parameters,
            total_seconds,
            rng,
            ..
        } = self;

        let mut cursor = buffer.release(quantity);
        let released = cursor.len();

        while let Some(particle) = cursor.next_mut() {
            let trigger_origin = origin(rng);
            let (offset, heading) = profile.offset_and_heading(rng);
            let speed = parameters.speed.sample(rng);

            *particle = Particle {
                age: 0.0,
                inception: *total_seconds,
                position: trigger_origin + offset,
                trigger_origin,
                velocity: heading * speed,
                color: parameters.color.sample(rng),
                opacity: parameters.opacity.sample(rng),
                scale: parameters.scale.sample(rng),
                rotation: parameters.rotation.sample(rng),
                mass: parameters.mass.sample(rng),
                layer_depth,
            };
        }

        released
    }

    /// Advance the simulation by `elapsed_seconds`
    ///
    /// `position` is used for auto-triggers. Returns `false` when no particle
    /// was live, in which case aging and modifiers are skipped.
    pub fn update(&mut self, elapsed_seconds: f32, position: Vec2) -> bool {
        self.total_seconds += elapsed_seconds;

        if let Some(period) = self.auto_trigger {
            self.run_auto_trigger(elapsed_seconds, period, position);
        }

        if self.buffer.is_empty() {
            return false;
        }

        self.reclaim_expired();

        let now = self.total_seconds;
        let lifespan = self.lifespan;
        self.buffer
            .cursor()
            .for_each_mut(|p| p.advance(now, lifespan, elapsed_seconds));

        self.execution_strategy
            .execute(&self.modifiers, elapsed_seconds, &mut self.buffer);

        true
    }

    fn run_auto_trigger(&mut self, elapsed_seconds: f32, period: f32, position: Vec2) {
        self.next_auto_trigger -= elapsed_seconds;

        let mut fired = 0;
        while self.next_auto_trigger <= 0.0 && fired < MAX_AUTO_TRIGGERS_PER_UPDATE {
            self.trigger(position, self.layer_depth);
            self.next_auto_trigger += period;
            fired += 1;
        }

        if self.next_auto_trigger < -period {
            trace!(
                "Emitter '{}' dropped {:.3}s of auto-trigger backlog",
                self.name,
                -period - self.next_auto_trigger
            );
            self.next_auto_trigger = -period;
        }
    }

    /// Reclaim the expired prefix of the live range
    ///
    /// Particles are appended in spawn order and share one lifespan, so the
    /// expired ones always form a prefix starting at the oldest particle.
    fn reclaim_expired(&mut self) -> usize {
        let now = self.total_seconds;
        let lifespan = self.lifespan;
        let expired = self
            .buffer
            .iter()
            .take_while(|p| p.is_expired(now, lifespan))
            .count();

        if expired > 0 {
            trace!("Emitter '{}' reclaiming {} particles", self.name, expired);
            self.buffer.reclaim(expired);
        }

        expired
    }

    /// Drop every live particle
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Release the particle buffer
    ///
    /// Safe to call more than once; [`set_capacity`](Self::set_capacity)
    /// allocates a fresh buffer afterwards.
    pub fn dispose(&mut self) {
        self.buffer.dispose();
    }

    /// Snapshot of the live particles in renderer-friendly form
    pub fn render_data(&self) -> Vec<ParticleVertex> {
        self.buffer.iter().map(ParticleVertex::from).collect()
    }
}

/// Step-by-step construction of a [`ParticleEmitter`]
///
/// Validation happens in [`build`](Self::build), so a misconfigured emitter
/// never reaches the update loop.
#[derive(Debug)]
pub struct ParticleEmitterBuilder {
    name: String,
    capacity: usize,
    lifespan: f32,
    profile: Option<Box<dyn Profile>>,
    parameters: ReleaseParameters,
    modifiers: Vec<Box<dyn Modifier>>,
    execution_strategy: ExecutionStrategy,
    offset: Vec2,
    layer_depth: f32,
    auto_trigger: Option<f32>,
    seed: Option<u64>,
}

impl ParticleEmitterBuilder {
    /// Start with a capacity of 1000 and a one second lifespan
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capacity: 1000,
            lifespan: 1.0,
            profile: None,
            parameters: ReleaseParameters::default(),
            modifiers: Vec::new(),
            execution_strategy: ExecutionStrategy::default(),
            offset: Vec2::ZERO,
            layer_depth: 0.0,
            auto_trigger: None,
            seed: None,
        }
    }

    /// Maximum number of live particles
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Particle lifespan in seconds
    pub fn lifespan(mut self, lifespan: f32) -> Self {
        self.lifespan = lifespan;
        self
    }

    /// Spawn profile, required
    pub fn profile(mut self, profile: impl Profile + 'static) -> Self {
        self.profile = Some(Box::new(profile));
        self
    }

    /// Spawn profile from an existing box
    pub fn boxed_profile(mut self, profile: Box<dyn Profile>) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Release distributions
    pub fn parameters(mut self, parameters: ReleaseParameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Append a modifier
    pub fn modifier(mut self, modifier: impl Modifier + 'static) -> Self {
        self.modifiers.push(Box::new(modifier));
        self
    }

    /// Replace the modifier list
    pub fn modifiers(mut self, modifiers: Vec<Box<dyn Modifier>>) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Modifier execution strategy
    pub fn execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.execution_strategy = strategy;
        self
    }

    /// Offset added to trigger positions
    pub fn offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Layer depth used by auto-triggers
    pub fn layer_depth(mut self, layer_depth: f32) -> Self {
        self.layer_depth = layer_depth;
        self
    }

    /// Trigger automatically every `period` seconds
    pub fn auto_trigger(mut self, period: f32) -> Self {
        self.auto_trigger = Some(period);
        self
    }

    /// Seed the random number generator for reproducible runs
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration and allocate the emitter
    pub fn build(self) -> Result<ParticleEmitter> {
        let profile = self
            .profile
            .ok_or_else(|| ParticleError::MissingProfile(self.name.clone()))?;
        validate_lifespan(self.lifespan)?;
        validate_auto_trigger(self.auto_trigger)?;
        self.parameters.validate()?;

        let buffer = ParticleBuffer::new(self.capacity)?;
        let rng = match self.seed {
            Some(seed) => ParticleRng::seed_from_u64(seed),
            None => ParticleRng::from_os_rng(),
        };

        debug!(
            "Created emitter '{}': capacity {}, lifespan {}s, {} modifiers, {} execution",
            self.name,
            self.capacity,
            self.lifespan,
            self.modifiers.len(),
            self.execution_strategy
        );

        Ok(ParticleEmitter {
            name: self.name,
            buffer,
            lifespan: self.lifespan,
            profile,
            parameters: self.parameters,
            modifiers: self.modifiers,
            execution_strategy: self.execution_strategy,
            offset: self.offset,
            layer_depth: self.layer_depth,
            auto_trigger: self.auto_trigger,
            next_auto_trigger: 0.0,
            total_seconds: 0.0,
            rng,
        })
    }
}
