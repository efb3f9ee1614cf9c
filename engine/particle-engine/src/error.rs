//! Error handling for particle simulation configuration

use thiserror::Error;

/// Errors raised while configuring particle stores, emitters and effects
///
/// Every variant is a construction-time failure. The per-frame update path
/// never produces an error: a saturated store or an empty live range is
/// ordinary control flow.
#[derive(Debug, Error)]
pub enum ParticleError {
    /// Store capacity must hold at least one particle
    #[error("Invalid capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),

    /// Particle lifespan must be strictly positive and finite
    #[error("Invalid lifespan: {0} seconds (must be positive and finite)")]
    InvalidLifespan(f32),

    /// An emitter was built without a spawn profile
    #[error("Emitter '{0}' has no profile")]
    MissingProfile(String),

    /// Execution strategy name not recognised
    #[error("Unknown execution strategy '{0}' (expected 'serial' or 'parallel')")]
    UnknownExecutionStrategy(String),

    /// A sampling range has its bounds the wrong way round
    #[error("Invalid range for {name}: min {min} is greater than max {max}")]
    InvalidRange {
        /// Name of the configured parameter
        name: &'static str,
        /// Configured lower bound
        min: f32,
        /// Configured upper bound
        max: f32,
    },

    /// A scalar parameter is outside its accepted domain
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Name of the configured parameter
        name: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// No built-in preset has the requested name
    #[error("Unknown preset '{0}'")]
    UnknownPreset(String),

    /// Definition could not be parsed or written as JSON
    #[cfg(feature = "serde-support")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Type alias for Results from particle operations
pub type Result<T> = std::result::Result<T, ParticleError>;
