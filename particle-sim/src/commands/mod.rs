//! Command implementations

pub mod presets;
pub mod run;
