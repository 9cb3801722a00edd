//! Command line interface for the headless runner

use anyhow::Result;
use clap::Parser;
use gravsim::{Method, Preset};
use std::path::PathBuf;
use tracing::info;

use crate::config::RunConfig;

/// Run a 2D gravitational N-body simulation without a display
#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to a scenario file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Integration method: euler or rk4 (overrides config file)
    #[arg(short, long, value_name = "METHOD")]
    pub method: Option<Method>,

    /// Time step per tick (overrides config file)
    #[arg(short = 't', long, value_name = "DT")]
    pub time_step: Option<f64>,

    /// Number of ticks to run (overrides config file)
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub ticks: Option<u64>,

    /// Starting scenario: empty, solar-system or protoplanetary-disk
    #[arg(short, long, value_name = "NAME")]
    pub preset: Option<Preset>,

    /// Random seed for randomised presets
    #[arg(short, long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Log progress every N ticks, 0 to disable
    #[arg(short, long, value_name = "N")]
    pub report_every: Option<u64>,

    /// Enable debug logging, including every merge
    #[arg(short, long)]
    pub verbose: bool,
}

/// Loads the scenario file or defaults, then applies command-line overrides
pub fn load_and_apply_config(args: &Args) -> Result<RunConfig> {
    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };

    if let Some(method) = args.method {
        info!(%method, "overriding integration method");
        config.method = method;
    }
    if let Some(time_step) = args.time_step {
        info!(time_step, "overriding time step");
        config.time_step = time_step;
    }
    if let Some(ticks) = args.ticks {
        config.ticks = ticks;
    }
    if let Some(preset) = args.preset {
        info!(%preset, "overriding preset");
        config.preset = preset;
    }
    if let Some(seed) = args.seed {
        info!(seed, "using random seed");
        config.seed = seed;
    }
    if let Some(report_every) = args.report_every {
        config.report_every = report_every;
    }

    Ok(config)
}
