//! Headless effect simulation

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use indicatif::ProgressBar;
use log::{debug, info};

use particle_engine::presets;
use particle_engine::{EffectDefinition, ExecutionStrategy, ParticleEffect};

use crate::utils::{
    add_table_row, create_progress_bar, create_table, format_bytes, format_occupancy, format_rate,
};

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Built-in preset to simulate
    #[arg(default_value = "fountain", conflicts_with = "config")]
    pub preset: String,

    /// JSON effect definition to simulate instead of a preset
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of frames to step
    #[arg(short, long, default_value_t = 600)]
    pub frames: u32,

    /// Seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    pub dt: f32,

    /// Override the execution strategy of every emitter (serial, parallel)
    #[arg(short, long)]
    pub strategy: Option<ExecutionStrategy>,

    /// Seed the emitters for a reproducible run
    #[arg(long, env = "PARTICLE_SIM_SEED")]
    pub seed: Option<u64>,

    /// Trigger the effect every N frames, 0 to rely on auto-triggers only
    #[arg(short, long, default_value_t = 30)]
    pub trigger_every: u32,

    /// Show a progress bar
    #[arg(long)]
    pub progress: bool,
}

/// Per-emitter statistics gathered while stepping an effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitterReport {
    pub name: String,
    pub strategy: ExecutionStrategy,
    pub capacity: usize,
    pub live: usize,
    pub peak: usize,
    pub arena_bytes: usize,
}

/// Outcome of a simulation run
#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub effect: String,
    pub frames: u32,
    pub simulated_seconds: f32,
    pub triggers: u32,
    pub active_frames: u32,
    pub emitters: Vec<EmitterReport>,
    pub wall_time: Duration,
}

/// Load the definition named by the arguments and apply overrides
pub fn load_definition(args: &RunArgs) -> Result<EffectDefinition> {
    let mut definition = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            EffectDefinition::from_json(&json)
                .with_context(|| format!("Failed to parse config: {}", path.display()))?
        }
        None => presets::preset(&args.preset)
            .with_context(|| format!("Available presets: {}", presets::PRESET_NAMES.join(", ")))?,
    };

    if let Some(seed) = args.seed {
        definition.reseed(seed);
    }
    if let Some(strategy) = args.strategy {
        definition.set_execution_strategy(strategy);
    }

    Ok(definition)
}

/// Step `effect` for the configured number of frames
pub fn simulate(
    effect: &mut ParticleEffect,
    args: &RunArgs,
    progress: Option<&ProgressBar>,
) -> SimulationReport {
    let mut peaks = vec![0usize; effect.emitters().len()];
    let mut triggers = 0;
    let mut active_frames = 0;
    let started = Instant::now();

    for frame in 0..args.frames {
        if args.trigger_every > 0 && frame % args.trigger_every == 0 {
            effect.trigger();
            triggers += 1;
        }

        if effect.update(args.dt) {
            active_frames += 1;
        }

        for (peak, emitter) in peaks.iter_mut().zip(effect.emitters()) {
            *peak = (*peak).max(emitter.active_particles());
        }

        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    let wall_time = started.elapsed();
    let emitters = effect
        .emitters()
        .iter()
        .zip(peaks)
        .map(|(emitter, peak)| EmitterReport {
            name: emitter.name().to_string(),
            strategy: emitter.execution_strategy,
            capacity: emitter.capacity(),
            live: emitter.active_particles(),
            peak,
            arena_bytes: emitter.buffer().size_in_bytes(),
        })
        .collect();

    SimulationReport {
        effect: effect.name().to_string(),
        frames: args.frames,
        simulated_seconds: args.frames as f32 * args.dt,
        triggers,
        active_frames,
        emitters,
        wall_time,
    }
}

pub fn execute(args: RunArgs, quiet: bool) -> Result<()> {
    anyhow::ensure!(
        args.dt.is_finite() && args.dt > 0.0,
        "Frame time must be positive, got {}",
        args.dt
    );

    let definition = load_definition(&args)?;
    info!(
        "Loaded effect '{}' with {} emitters",
        definition.name,
        definition.emitters.len()
    );

    let mut effect = definition
        .build()
        .with_context(|| format!("Invalid effect definition '{}'", definition.name))?;

    let progress = (args.progress && !quiet)
        .then(|| create_progress_bar(u64::from(args.frames), &definition.name));

    let report = simulate(&mut effect, &args, progress.as_ref());

    if let Some(pb) = progress {
        pb.finish_with_message("done");
    }
    debug!("Simulation finished in {:?}", report.wall_time);

    if !quiet {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &SimulationReport) {
    println!(
        "Effect: {}  ({} frames, {:.2}s simulated, {} triggers, active in {} frames)",
        style(&report.effect).cyan(),
        report.frames,
        report.simulated_seconds,
        report.triggers,
        report.active_frames
    );

    let mut table = create_table(&[
        "Emitter", "Strategy", "Capacity", "Live", "Peak", "Peak use", "Arena",
    ]);
    for emitter in &report.emitters {
        add_table_row(
            &mut table,
            vec![
                emitter.name.clone(),
                emitter.strategy.to_string(),
                emitter.capacity.to_string(),
                emitter.live.to_string(),
                emitter.peak.to_string(),
                format_occupancy(emitter.peak, emitter.capacity),
                format_bytes(emitter.arena_bytes as u64),
            ],
        );
    }
    table.printstd();

    println!(
        "Wall time: {:.2?} ({})",
        report.wall_time,
        style(format_rate(u64::from(report.frames), report.wall_time)).yellow()
    );
}
