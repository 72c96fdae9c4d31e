//! `gild` - render the regression scenes, write golden images, validate.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gild_harness::{
    bake, run_generate, run_validate, FailurePolicy, HarnessConfig, ReferenceTable, StdoutSink,
};

#[derive(Parser)]
#[command(name = "gild")]
#[command(about = "Packet ray tracer golden-image harness", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every scene and write output_<N>.ppm files
    Generate {
        /// Output directory (created if missing)
        #[arg(short, long, default_value = "reference_ppm")]
        out: PathBuf,

        /// Also write a PNG preview per scene
        #[arg(long)]
        png: bool,

        /// Only render this scene
        #[arg(long)]
        scene: Option<usize>,
    },
    /// Render every scene and compare against reference images
    Validate {
        /// Directory of output_<N>.ppm files or a baked table file
        #[arg(short, long, default_value = "reference_ppm")]
        references: PathBuf,

        /// Keep validating after the first failing scene
        #[arg(long)]
        keep_going: bool,

        /// Only validate this scene
        #[arg(long)]
        scene: Option<usize>,
    },
    /// Pack a directory of output_<N>.ppm files into one table file
    Bake {
        /// Directory of output_<N>.ppm files
        #[arg(short, long, default_value = "reference_ppm")]
        references: PathBuf,

        /// Table file to write
        #[arg(short, long, default_value = "reference_images.bin")]
        out: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    match run(Cli::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            log::error!("{:#}", err);
            ExitCode::from(1)
        }
    }
}

/// Returns `false` when validation ran but a scene did not match.
fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Commands::Generate { out, png, scene } => {
            let config = harness_config(scene)?.with_png(png);
            let written = run_generate(&config, &out, &mut StdoutSink)
                .with_context(|| format!("Failed to generate into {}", out.display()))?;
            log::info!("Generated {} images in {}", written.len(), out.display());
            Ok(true)
        }
        Commands::Validate {
            references,
            keep_going,
            scene,
        } => {
            let policy = if keep_going {
                FailurePolicy::Continue
            } else {
                FailurePolicy::Halt
            };
            let config = harness_config(scene)?.with_policy(policy);
            let table =
                ReferenceTable::load(&references, config.render.width, config.render.height)
                    .with_context(|| {
                        format!("Failed to load references from {}", references.display())
                    })?;

            let report = run_validate(&config, &table, &mut StdoutSink)?;
            if let Some(first) = report.first_failure {
                log::error!(
                    "{} of {} scenes failed, first was scene {}",
                    report.failed.len(),
                    report.failed.len() + report.passed.len(),
                    first.scene
                );
            }
            Ok(report.is_success())
        }
        Commands::Bake { references, out } => {
            let config = HarnessConfig::default();
            let count = bake(&references, &out, config.render.width, config.render.height)
                .with_context(|| format!("Failed to bake {}", references.display()))?;
            println!("Baked {} scenes into {}", count, out.display());
            Ok(true)
        }
    }
}

fn harness_config(scene: Option<usize>) -> Result<HarnessConfig> {
    let config = HarnessConfig::default();
    match scene {
        Some(index) => Ok(config.with_scene(index)?),
        None => Ok(config),
    }
}
