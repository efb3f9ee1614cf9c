//! Particle-sim library
//!
//! Command definitions and output helpers behind the `particle-sim` binary.

pub mod cli;
pub mod commands;
pub mod utils;
