//! Built-in preset listing and export

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use console::style;

use particle_engine::presets::{self, PRESET_NAMES};

use crate::utils::{add_table_row, create_table};

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// Preset name
    pub name: String,

    /// Write the definition to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

pub fn execute_list() -> Result<()> {
    let mut table = create_table(&["Preset", "Emitters", "Capacity", "Auto-trigger"]);

    for name in PRESET_NAMES {
        let definition = presets::preset(name)?;
        let emitters: Vec<&str> = definition
            .emitters
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        let auto = definition.emitters.iter().any(|e| e.auto_trigger.is_some());

        add_table_row(
            &mut table,
            vec![
                (*name).to_string(),
                emitters.join(", "),
                definition.total_capacity().to_string(),
                if auto { "yes" } else { "no" }.to_string(),
            ],
        );
    }

    table.printstd();
    Ok(())
}

pub fn execute_show(args: ShowArgs) -> Result<()> {
    let definition = presets::preset(&args.name)
        .with_context(|| format!("Available presets: {}", PRESET_NAMES.join(", ")))?;
    let json = definition.to_json_pretty()?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, json + "\n")
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "✓ Wrote preset '{}' to {}",
                style(&args.name).cyan(),
                style(path.display()).yellow()
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}
