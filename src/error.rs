// error.rs
// Error types surfaced when building a simulation or loading its configuration

use thiserror::Error;

/// Invalid construction input. The step itself never fails.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InitError {
    #[error("body count must be at least 1")]
    EmptyPopulation,
    #[error("domain must have positive finite size, got {width} x {height}")]
    InvalidDomain { width: f32, height: f32 },
    #[error("body radius must be positive and finite, got {0}")]
    InvalidRadius(f32),
    #[error("body mass must be positive and finite, got {0}")]
    InvalidMass(f32),
    #[error("mass multiplier upper bound must be at least 1, got {0}")]
    InvalidMassMultiplier(u32),
    #[error("softening distance must be positive and finite, got {0}")]
    InvalidSoftening(f32),
    #[error("gravitational constant must be finite, got {0}")]
    InvalidGravitationalConstant(f32),
    #[error("timestep must be positive and finite, got {0}")]
    InvalidTimestep(f32),
    #[error("target frame rate must be positive and finite, got {0}")]
    InvalidFrameRate(f32),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(#[from] InitError),
}
