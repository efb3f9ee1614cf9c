//! Fixed-capacity 2D particle simulation.
//!
//! Particles live in a preallocated ring buffer owned by a
//! [`ParticleEmitter`]. Triggers release batches into the buffer, each
//! [`update`](ParticleEmitter::update) ages the live range, reclaims expired
//! particles from the front and runs the emitter's [`Modifier`] list under
//! the selected [`ExecutionStrategy`].
//!
//! # Examples
//!
//! ```
//! use glam::Vec2;
//! use particle_engine::{
//!     LinearGravityModifier, OpacityFastFadeModifier, ParticleEmitter, SprayProfile,
//! };
//!
//! let mut emitter = ParticleEmitter::builder("fountain")
//!     .capacity(500)
//!     .lifespan(2.0)
//!     .profile(SprayProfile { direction: Vec2::NEG_Y, spread: 0.4 })
//!     .modifier(LinearGravityModifier { direction: Vec2::Y, strength: 100.0 })
//!     .modifier(OpacityFastFadeModifier)
//!     .seed(7)
//!     .build()
//!     .unwrap();
//!
//! emitter.trigger(Vec2::new(320.0, 400.0), 0.0);
//! assert!(emitter.update(1.0 / 60.0, Vec2::ZERO));
//! assert_eq!(emitter.active_particles(), 1);
//! ```
//!
//! # Features
//!
//! - `parallel` (default): run [`ExecutionStrategy::Parallel`] on the rayon
//!   pool. Without it the strategy falls back to serial execution.
//! - `serde-support`: serialize value types and load
//!   [`EffectDefinition`]s from JSON.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod buffer;
pub mod color;
pub mod definition;
pub mod effect;
pub mod emitter;
pub mod error;
pub mod execution;
pub mod modifiers;
pub mod particle;
pub mod presets;
pub mod profile;
pub mod range;

pub use buffer::{ParticleBuffer, ParticleCursor};
pub use color::HslColor;
pub use definition::{EffectDefinition, EmitterDefinition, ModifierDefinition, ProfileDefinition};
pub use effect::ParticleEffect;
pub use emitter::{
    MAX_AUTO_TRIGGERS_PER_UPDATE, ParticleEmitter, ParticleEmitterBuilder, ReleaseParameters,
    ScaleRange,
};
pub use error::{ParticleError, Result};
pub use execution::{ExecutionStrategy, PARALLEL_CHUNK_SIZE};
pub use modifiers::{
    AgeModifier, CircleContainerModifier, DragModifier, Interpolator, LinearGravityModifier,
    Modifier, OpacityFastFadeModifier, RectangleContainerModifier,
    RectangleLoopContainerModifier, RotationModifier, VelocityColorModifier, VelocityModifier,
    VortexModifier,
};
pub use particle::{Particle, ParticleVertex};
pub use profile::{
    BoxFillProfile, BoxProfile, CircleProfile, CircleRadiation, LineProfile, PointProfile,
    Profile, RingProfile, SprayProfile,
};
pub use range::{ColorRange, ValueRange};

/// Random number generator owned by each emitter
pub type ParticleRng = rand::rngs::SmallRng;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
