//! Scenario files for the headless runner

use anyhow::{Context, Result};
use gravsim::presets::DEFAULT_DISK_BODIES;
use gravsim::{BodySpec, Method, Preset, Simulation};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Everything needed to set up and run a simulation
///
/// Missing keys fall back to [`RunConfig::default`].
///
/// ```toml
/// method = "rk4"
/// time_step = 0.005
/// ticks = 5000
/// preset = "protoplanetary-disk"
/// disk_bodies = 300
///
/// [[bodies]]
/// mass = 50.0
/// radius = 5.0
/// position = [2000.0, 0.0]
/// velocity = [0.0, 1800.0]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub method: Method,
    pub time_step: f64,
    /// Number of ticks to run
    pub ticks: u64,
    /// Log a progress line every this many ticks; 0 disables them
    pub report_every: u64,
    /// Seed for randomised presets
    pub seed: u64,
    pub preset: Preset,
    /// Body count for the protoplanetary disk preset
    pub disk_bodies: usize,
    /// Extra bodies added after the preset
    pub bodies: Vec<BodySpec>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            method: Method::default(),
            time_step: gravsim::engine::DEFAULT_TIME_STEP,
            ticks: 1000,
            report_every: 100,
            seed: 42,
            preset: Preset::SolarSystem,
            disk_bodies: DEFAULT_DISK_BODIES,
            bodies: Vec::new(),
        }
    }
}

impl RunConfig {
    /// Read a scenario from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Initial conditions: the preset's bodies followed by the listed ones
    pub fn initial_bodies(&self) -> Vec<BodySpec> {
        let mut specs = self.preset.bodies(self.seed, self.disk_bodies);
        specs.extend_from_slice(&self.bodies);
        specs
    }

    /// Build a simulation ready to run this scenario
    pub fn build_simulation(&self) -> Result<Simulation> {
        let mut sim = Simulation::with_config(self.method, self.time_step)
            .context("invalid simulation settings")?;
        sim.load(&self.initial_bodies())
            .context("invalid initial conditions")?;
        Ok(sim)
    }
}
