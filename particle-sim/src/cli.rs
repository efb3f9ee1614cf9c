//! Root CLI structure for particle-sim

use clap::{Parser, Subcommand};

use crate::commands::presets::ShowArgs;
use crate::commands::run::RunArgs;

#[derive(Parser)]
#[command(name = "particle-sim")]
#[command(about = "Step particle effects headlessly and report what they do", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Simulate an effect for a number of frames
    Run(RunArgs),

    /// List the built-in presets
    Presets,

    /// Print a preset as a JSON effect definition
    Show(ShowArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
