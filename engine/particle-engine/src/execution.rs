//! Strategies for applying a modifier list over the live particles

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::buffer::{ParticleBuffer, ParticleCursor};
use crate::error::ParticleError;
use crate::modifiers::Modifier;
#[cfg(feature = "parallel")]
use crate::particle::Particle;

/// Number of particles handed to one parallel task
pub const PARALLEL_CHUNK_SIZE: usize = 1024;

/// How the modifiers of an emitter are run each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExecutionStrategy {
    /// One thread, each modifier walks the whole live range in list order
    #[default]
    Serial,
    /// The live range is split into chunks processed on the rayon pool
    ///
    /// Every chunk runs the complete modifier list in order, so each particle
    /// sees the same sequence of transforms as under [`Serial`](Self::Serial)
    /// and no two tasks ever touch the same particle.
    Parallel,
}

impl ExecutionStrategy {
    /// Run `modifiers` over every live particle in `buffer`
    pub fn execute(
        self,
        modifiers: &[Box<dyn Modifier>],
        elapsed_seconds: f32,
        buffer: &mut ParticleBuffer,
    ) {
        if modifiers.is_empty() || buffer.is_empty() {
            return;
        }

        match self {
            Self::Serial => run_chain(modifiers, elapsed_seconds, &mut buffer.cursor()),
            Self::Parallel => execute_parallel(modifiers, elapsed_seconds, buffer),
        }
    }

    /// Canonical lower-case name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Serial => "serial",
            Self::Parallel => "parallel",
        }
    }
}

/// Apply every modifier in list order, rewinding the cursor in between
fn run_chain(
    modifiers: &[Box<dyn Modifier>],
    elapsed_seconds: f32,
    cursor: &mut ParticleCursor<'_>,
) {
    for modifier in modifiers {
        cursor.reset();
        modifier.update(elapsed_seconds, cursor);
    }
}

#[cfg(feature = "parallel")]
fn execute_parallel(
    modifiers: &[Box<dyn Modifier>],
    elapsed_seconds: f32,
    buffer: &mut ParticleBuffer,
) {
    if buffer.count() <= PARALLEL_CHUNK_SIZE {
        run_chain(modifiers, elapsed_seconds, &mut buffer.cursor());
        return;
    }

    let (front, back) = buffer.as_mut_slices();
    front
        .par_chunks_mut(PARALLEL_CHUNK_SIZE)
        .chain(back.par_chunks_mut(PARALLEL_CHUNK_SIZE))
        .for_each(|chunk: &mut [Particle]| {
            run_chain(modifiers, elapsed_seconds, &mut ParticleCursor::over(chunk));
        });
}

#[cfg(not(feature = "parallel"))]
fn execute_parallel(
    modifiers: &[Box<dyn Modifier>],
    elapsed_seconds: f32,
    buffer: &mut ParticleBuffer,
) {
    run_chain(modifiers, elapsed_seconds, &mut buffer.cursor());
}

impl FromStr for ExecutionStrategy {
    type Err = ParticleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("serial") {
            Ok(Self::Serial)
        } else if s.eq_ignore_ascii_case("parallel") {
            Ok(Self::Parallel)
        } else {
            Err(ParticleError::UnknownExecutionStrategy(s.to_string()))
        }
    }
}

impl fmt::Display for ExecutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
