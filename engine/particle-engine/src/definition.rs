//! Declarative effect configuration
//!
//! Definitions are plain data describing emitters, profiles and modifiers.
//! [`EffectDefinition::build`] turns them into live objects and runs every
//! construction-time check, so a definition loaded from disk fails early
//! instead of misbehaving in the update loop.
//!
//! With the `serde-support` feature definitions round-trip through JSON:
//!
//! ```ignore
//! use particle_engine::EffectDefinition;
//!
//! let definition = EffectDefinition::from_json(&std::fs::read_to_string("fire.json")?)?;
//! let mut effect = definition.build()?;
//! effect.trigger();
//! ```

use glam::Vec2;

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};

use crate::effect::ParticleEffect;
use crate::emitter::{ParticleEmitter, ReleaseParameters};
use crate::error::{ParticleError, Result};
use crate::execution::ExecutionStrategy;
use crate::modifiers::{
    AgeModifier, CircleContainerModifier, DragModifier, LinearGravityModifier, Modifier,
    OpacityFastFadeModifier, RectangleContainerModifier, RectangleLoopContainerModifier,
    RotationModifier, VelocityColorModifier, VelocityModifier, VortexModifier,
};
use crate::profile::{
    BoxFillProfile, BoxProfile, CircleProfile, LineProfile, PointProfile, Profile, RingProfile,
    SprayProfile,
};

fn ensure_positive(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ParticleError::InvalidParameter {
            name,
            reason: format!("must be positive and finite, got {value}"),
        })
    }
}

fn ensure_non_negative(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ParticleError::InvalidParameter {
            name,
            reason: format!("must be non-negative and finite, got {value}"),
        })
    }
}

fn ensure_finite(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParticleError::InvalidParameter {
            name,
            reason: format!("must be finite, got {value}"),
        })
    }
}

fn ensure_direction(name: &'static str, value: Vec2) -> Result<()> {
    if value.is_finite() && value.length_squared() > f32::EPSILON {
        Ok(())
    } else {
        Err(ParticleError::InvalidParameter {
            name,
            reason: format!("must be a non-zero finite vector, got {value}"),
        })
    }
}

/// Spawn profile selection
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde-support",
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum ProfileDefinition {
    /// [`PointProfile`]
    Point,
    /// [`LineProfile`]
    Line(LineProfile),
    /// [`RingProfile`]
    Ring(RingProfile),
    /// [`CircleProfile`]
    Circle(CircleProfile),
    /// [`BoxProfile`]
    Box(BoxProfile),
    /// [`BoxFillProfile`]
    BoxFill(BoxFillProfile),
    /// [`SprayProfile`]
    Spray(SprayProfile),
}

impl ProfileDefinition {
    /// Check geometric parameters
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Point => Ok(()),
            Self::Line(line) => {
                ensure_direction("line.axis", line.axis)?;
                ensure_finite("line.length", line.length)
            }
            Self::Ring(ring) => ensure_positive("ring.radius", ring.radius),
            Self::Circle(circle) => ensure_positive("circle.radius", circle.radius),
            Self::Box(b) => {
                ensure_positive("box.width", b.width)?;
                ensure_positive("box.height", b.height)
            }
            Self::BoxFill(b) => {
                ensure_positive("box_fill.width", b.width)?;
                ensure_positive("box_fill.height", b.height)
            }
            Self::Spray(spray) => {
                ensure_direction("spray.direction", spray.direction)?;
                ensure_finite("spray.spread", spray.spread)
            }
        }
    }

    /// Create the runtime profile
    pub fn to_profile(&self) -> Box<dyn Profile> {
        match *self {
            Self::Point => Box::new(PointProfile),
            Self::Line(line) => Box::new(line),
            Self::Ring(ring) => Box::new(ring),
            Self::Circle(circle) => Box::new(circle),
            Self::Box(b) => Box::new(b),
            Self::BoxFill(b) => Box::new(b),
            Self::Spray(spray) => Box::new(spray),
        }
    }
}

/// Modifier selection with its parameters
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde-support",
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum ModifierDefinition {
    /// [`OpacityFastFadeModifier`]
    OpacityFastFade,
    /// [`RotationModifier`]
    Rotation(RotationModifier),
    /// [`LinearGravityModifier`]
    LinearGravity(LinearGravityModifier),
    /// [`DragModifier`]
    Drag(DragModifier),
    /// [`VortexModifier`]
    Vortex(VortexModifier),
    /// [`AgeModifier`]
    Age(AgeModifier),
    /// [`VelocityColorModifier`]
    VelocityColor(VelocityColorModifier),
    /// [`VelocityModifier`]
    Velocity(VelocityModifier),
    /// [`RectangleContainerModifier`]
    RectangleContainer(RectangleContainerModifier),
    /// [`RectangleLoopContainerModifier`]
    RectangleLoopContainer(RectangleLoopContainerModifier),
    /// [`CircleContainerModifier`]
    CircleContainer(CircleContainerModifier),
}

impl ModifierDefinition {
    /// Check parameters that would make the modifier produce non-finite values
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::OpacityFastFade | Self::Age(_) => Ok(()),
            Self::Rotation(m) => ensure_finite("rotation.rotation_rate", m.rotation_rate),
            Self::LinearGravity(m) => {
                ensure_finite("linear_gravity.direction.x", m.direction.x)?;
                ensure_finite("linear_gravity.direction.y", m.direction.y)?;
                ensure_finite("linear_gravity.strength", m.strength)
            }
            Self::Drag(m) => {
                ensure_finite("drag.drag_coefficient", m.drag_coefficient)?;
                ensure_finite("drag.density", m.density)
            }
            Self::Vortex(m) => {
                ensure_finite("vortex.position.x", m.position.x)?;
                ensure_finite("vortex.position.y", m.position.y)?;
                ensure_finite("vortex.mass", m.mass)?;
                ensure_non_negative("vortex.max_speed", m.max_speed)
            }
            Self::VelocityColor(m) => {
                ensure_positive("velocity_color.velocity_threshold", m.velocity_threshold)
            }
            Self::Velocity(m) => ensure_positive("velocity.velocity_threshold", m.velocity_threshold),
            Self::RectangleContainer(m) => {
                ensure_positive("rectangle_container.width", m.width)?;
                ensure_positive("rectangle_container.height", m.height)?;
                ensure_finite(
                    "rectangle_container.restitution_coefficient",
                    m.restitution_coefficient,
                )
            }
            Self::RectangleLoopContainer(m) => {
                ensure_positive("rectangle_loop_container.width", m.width)?;
                ensure_positive("rectangle_loop_container.height", m.height)
            }
            Self::CircleContainer(m) => {
                ensure_positive("circle_container.radius", m.radius)?;
                ensure_finite(
                    "circle_container.restitution_coefficient",
                    m.restitution_coefficient,
                )
            }
        }
    }

    /// Create the runtime modifier
    pub fn to_modifier(&self) -> Box<dyn Modifier> {
        match self {
            Self::OpacityFastFade => Box::new(OpacityFastFadeModifier),
            Self::Rotation(m) => Box::new(*m),
            Self::LinearGravity(m) => Box::new(*m),
            Self::Drag(m) => Box::new(*m),
            Self::Vortex(m) => Box::new(*m),
            Self::Age(m) => Box::new(m.clone()),
            Self::VelocityColor(m) => Box::new(*m),
            Self::Velocity(m) => Box::new(m.clone()),
            Self::RectangleContainer(m) => Box::new(*m),
            Self::RectangleLoopContainer(m) => Box::new(*m),
            Self::CircleContainer(m) => Box::new(*m),
        }
    }
}

/// Configuration of one emitter
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct EmitterDefinition {
    /// Emitter name
    pub name: String,
    /// Maximum number of live particles
    pub capacity: usize,
    /// Particle lifespan in seconds
    pub lifespan: f32,
    /// Offset added to every trigger position
    pub offset: Vec2,
    /// Layer depth used by effect triggers and auto-triggers
    pub layer_depth: f32,
    /// Auto-trigger period in seconds
    #[cfg_attr(
        feature = "serde-support",
        serde(skip_serializing_if = "Option::is_none")
    )]
    pub auto_trigger: Option<f32>,
    /// Execution strategy name, `serial` or `parallel`
    pub execution_strategy: String,
    /// Random seed, drawn from the OS when absent
    #[cfg_attr(
        feature = "serde-support",
        serde(skip_serializing_if = "Option::is_none")
    )]
    pub seed: Option<u64>,
    /// Spawn profile, required
    pub profile: Option<ProfileDefinition>,
    /// Release distributions
    pub parameters: ReleaseParameters,
    /// Modifiers in execution order
    pub modifiers: Vec<ModifierDefinition>,
}

impl Default for EmitterDefinition {
    fn default() -> Self {
        Self {
            name: String::from("emitter"),
            capacity: 1000,
            lifespan: 1.0,
            offset: Vec2::ZERO,
            layer_depth: 0.0,
            auto_trigger: None,
            execution_strategy: ExecutionStrategy::Serial.as_str().to_string(),
            seed: None,
            profile: None,
            parameters: ReleaseParameters::default(),
            modifiers: Vec::new(),
        }
    }
}

impl EmitterDefinition {
    /// Validate and create the emitter
    pub fn build(&self) -> Result<ParticleEmitter> {
        let strategy: ExecutionStrategy = self.execution_strategy.parse()?;

        let mut builder = ParticleEmitter::builder(self.name.clone())
            .capacity(self.capacity)
            .lifespan(self.lifespan)
            .parameters(self.parameters.clone())
            .execution_strategy(strategy)
            .offset(self.offset)
            .layer_depth(self.layer_depth);

        if let Some(profile) = &self.profile {
            profile.validate()?;
            builder = builder.boxed_profile(profile.to_profile());
        }

        let mut modifiers = Vec::with_capacity(self.modifiers.len());
        for modifier in &self.modifiers {
            modifier.validate()?;
            modifiers.push(modifier.to_modifier());
        }
        builder = builder.modifiers(modifiers);

        if let Some(period) = self.auto_trigger {
            builder = builder.auto_trigger(period);
        }
        if let Some(seed) = self.seed {
            builder = builder.seed(seed);
        }

        builder.build()
    }
}

/// Configuration of a whole effect
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct EffectDefinition {
    /// Effect name
    pub name: String,
    /// Initial effect position
    pub position: Vec2,
    /// Emitters in update order
    pub emitters: Vec<EmitterDefinition>,
}

impl EffectDefinition {
    /// Validate and create the effect with all of its emitters
    pub fn build(&self) -> Result<ParticleEffect> {
        let emitters = self
            .emitters
            .iter()
            .map(EmitterDefinition::build)
            .collect::<Result<Vec<_>>>()?;

        let mut effect = ParticleEffect::with_emitters(self.name.clone(), emitters);
        effect.position = self.position;
        Ok(effect)
    }

    /// Override the seed of every emitter, offsetting it by the emitter index
    pub fn reseed(&mut self, seed: u64) {
        for (index, emitter) in self.emitters.iter_mut().enumerate() {
            emitter.seed = Some(seed.wrapping_add(index as u64));
        }
    }

    /// Override the execution strategy of every emitter
    pub fn set_execution_strategy(&mut self, strategy: ExecutionStrategy) {
        for emitter in &mut self.emitters {
            emitter.execution_strategy = strategy.as_str().to_string();
        }
    }

    /// Sum of emitter capacities
    pub fn total_capacity(&self) -> usize {
        self.emitters.iter().map(|e| e.capacity).sum()
    }
}

#[cfg(feature = "serde-support")]
impl EffectDefinition {
    /// Parse a definition from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the definition as indented JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
