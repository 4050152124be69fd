//! levsim CLI — flashloan-leverage simulation commands.
//!
//! Commands:
//! - `run` — execute one trade lifecycle and print its report
//! - `sweep` — run many seeded trials in parallel and print the summary
//!
//! Both commands load a TOML config (or the built-in defaults) and
//! apply flag overrides on top, then optionally write a JSON artifact
//! named by the config's content hash.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use levsim_runner::{
    report::{render_summary, render_trade},
    run_sweep, run_trade, save_artifact, RunArtifact, SimConfig,
};

#[derive(Parser)]
#[command(
    name = "levsim",
    about = "levsim CLI — flashloan-funded leveraged-long simulator"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a single trade lifecycle and print the outcome report.
    Run {
        /// Path to a TOML config file. Defaults apply if omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Initial margin in USDC.
        #[arg(long)]
        collateral: Option<f64>,

        /// Leverage multiplier (>= 1).
        #[arg(long)]
        leverage: Option<f64>,

        /// Term length in days.
        #[arg(long)]
        expiry_days: Option<u32>,

        /// Master seed for reserve walk, gas, and slippage sampling.
        #[arg(long)]
        seed: Option<u64>,

        /// Output directory for the result JSON.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,

        /// Skip writing the JSON artifact.
        #[arg(long, default_value_t = false)]
        no_artifact: bool,
    },
    /// Run many independent trials in parallel and print the summary.
    Sweep {
        /// Path to a TOML config file. Defaults apply if omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Number of trials.
        #[arg(long, default_value_t = 1000)]
        trials: u64,

        /// Leverage multiplier (>= 1).
        #[arg(long)]
        leverage: Option<f64>,

        /// Master seed.
        #[arg(long)]
        seed: Option<u64>,

        /// Output directory for the result JSON.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,

        /// Skip writing the JSON artifact.
        #[arg(long, default_value_t = false)]
        no_artifact: bool,
    },
}

fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    match path {
        Some(path) => SimConfig::from_toml_file(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(SimConfig::default()),
    }
}

fn apply_overrides(
    config: &mut SimConfig,
    collateral: Option<f64>,
    leverage: Option<f64>,
    expiry_days: Option<u32>,
    seed: Option<u64>,
) {
    if let Some(collateral) = collateral {
        config.position.collateral = collateral;
    }
    if let Some(leverage) = leverage {
        config.position.leverage = leverage;
    }
    if let Some(expiry_days) = expiry_days {
        config.position.expiry_days = expiry_days;
    }
    if let Some(seed) = seed {
        config.seed = seed;
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            collateral,
            leverage,
            expiry_days,
            seed,
            output_dir,
            no_artifact,
        } => {
            let mut config = load_config(config.as_deref())?;
            apply_overrides(&mut config, collateral, leverage, expiry_days, seed);

            let record = run_trade(&config, 0).context("running trade")?;
            println!("{}", render_trade(&record));

            if !no_artifact {
                let artifact = RunArtifact::new(&config, vec![record]);
                let path = save_artifact(&output_dir, &artifact).context("saving artifact")?;
                println!("Saved artifact to {}", path.display());
            }
        }
        Commands::Sweep {
            config,
            trials,
            leverage,
            seed,
            output_dir,
            no_artifact,
        } => {
            let mut config = load_config(config.as_deref())?;
            apply_overrides(&mut config, None, leverage, None, seed);

            let result = run_sweep(&config, trials).context("running sweep")?;
            println!("{}", render_summary(&result.summary));

            if !no_artifact {
                let artifact = RunArtifact::new(&config, result.records);
                let path = save_artifact(&output_dir, &artifact).context("saving artifact")?;
                println!("Saved artifact to {}", path.display());
            }
        }
    }

    Ok(())
}
