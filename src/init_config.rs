// init_config.rs
// Handles loading and parsing the run configuration from init_config.toml

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config::{self, SimConfig};
use crate::error::ConfigError;
use crate::spawn::SpawnConfig;

pub const DEFAULT_PATH: &str = "init_config.toml";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct InitConfig {
    pub simulation: Option<SimulationConfig>,
    pub bodies: Option<SpawnConfig>,
    pub runner: Option<RunnerConfig>,
}

/// `[simulation]` table. Every key is optional and falls back to the defaults in `config`.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SimulationConfig {
    pub domain_width: Option<f32>,
    pub domain_height: Option<f32>,
    pub gravitational_constant: Option<f32>,
    pub softening: Option<f32>,
    pub collision_iterations: Option<usize>,
}

/// `[runner]` table for the headless binary.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub target_fps: f32,
    /// Use a constant dt of `1 / target_fps` instead of measured wall time.
    pub fixed_step: bool,
    pub ticks: u64,
    pub threads: usize,
    pub log_interval: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            target_fps: config::TARGET_FPS,
            fixed_step: false,
            ticks: config::DEFAULT_TICKS,
            threads: config::SIM_THREADS,
            log_interval: config::LOG_INTERVAL,
        }
    }
}

impl SimulationConfig {
    /// Return the physics parameters, using the global defaults when values are not provided.
    pub fn to_sim_config(&self) -> SimConfig {
        let d = SimConfig::default();
        SimConfig {
            gravitational_constant: self.gravitational_constant.unwrap_or(d.gravitational_constant),
            softening: self.softening.unwrap_or(d.softening),
            collision_iterations: self.collision_iterations.unwrap_or(d.collision_iterations),
            domain_width: self.domain_width.unwrap_or(d.domain_width),
            domain_height: self.domain_height.unwrap_or(d.domain_height),
        }
    }
}

impl InitConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: InitConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to built-in defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            log::info!("loading configuration from {}", path.display());
            Self::load_from_file(path)
        } else {
            log::info!("{} not found, using built-in defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn sim_config(&self) -> SimConfig {
        self.simulation
            .as_ref()
            .map(SimulationConfig::to_sim_config)
            .unwrap_or_default()
    }

    pub fn spawn_config(&self) -> SpawnConfig {
        self.bodies.clone().unwrap_or_default()
    }

    pub fn runner_config(&self) -> RunnerConfig {
        self.runner.clone().unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sim_config().validate()?;
        self.spawn_config().validate()?;
        let fps = self.runner_config().target_fps;
        if !(fps.is_finite() && fps > 0.0) {
            return Err(crate::error::InitError::InvalidFrameRate(fps).into());
        }
        Ok(())
    }
}
