//! Per-frame particle modifiers
//!
//! A modifier walks a [`ParticleCursor`] once per frame and rewrites the
//! fields it owns. Modifiers keep no per-particle state between calls; any
//! value that is constant for the frame is computed before the walk starts.
//!
//! # Available modifiers
//!
//! - Forces: [`LinearGravityModifier`], [`DragModifier`], [`VortexModifier`]
//! - Appearance: [`OpacityFastFadeModifier`], [`RotationModifier`],
//!   [`VelocityColorModifier`]
//! - Interpolation: [`AgeModifier`], [`VelocityModifier`]
//! - Containment: [`RectangleContainerModifier`],
//!   [`RectangleLoopContainerModifier`], [`CircleContainerModifier`]

mod age;
mod containers;
mod fade;
mod forces;
mod interpolators;
mod rotation;
mod velocity;

use std::fmt;

use crate::buffer::ParticleCursor;

pub use age::AgeModifier;
pub use containers::{
    CircleContainerModifier, RectangleContainerModifier, RectangleLoopContainerModifier,
};
pub use fade::OpacityFastFadeModifier;
pub use forces::{DragModifier, LinearGravityModifier, VortexModifier};
pub use interpolators::Interpolator;
pub use rotation::RotationModifier;
pub use velocity::{VelocityColorModifier, VelocityModifier};

/// A transform applied to every live particle once per frame
///
/// Implementations must only touch the particles handed to them through the
/// cursor and must not depend on the order in which particles are visited.
pub trait Modifier: fmt::Debug + Send + Sync {
    /// Short identifier used in logs and reports
    fn name(&self) -> &'static str;

    /// Walk `particles` to the end, mutating each one
    fn update(&self, elapsed_seconds: f32, particles: &mut ParticleCursor<'_>);
}
