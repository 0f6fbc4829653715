// Centralized configuration for simulation parameters

use serde::{Deserialize, Serialize};

use crate::error::InitError;

// ====================
// Force Parameters
// ====================
/// Gravitational constant in simulation units (pixels, seconds, mass units).
pub const GRAVITATIONAL_CONSTANT: f32 = 1000.0;
/// Distance added to every separation before the inverse-square law is applied.
pub const SOFTENING: f32 = 10.0;

// ====================
// Collision Parameters
// ====================
pub const COLLISION_ITERATIONS: usize = 10; // Full all-pairs passes per step

// ====================
// Domain
// ====================
pub const DOMAIN_WIDTH: f32 = 1600.0;
pub const DOMAIN_HEIGHT: f32 = 900.0;

// ====================
// Initialization
// ====================
pub const BODY_COUNT: usize = 800;
pub const BODY_RADIUS: f32 = 5.0;
/// Initial velocity components are drawn uniformly from [-INITIAL_SPEED, INITIAL_SPEED).
pub const INITIAL_SPEED: f32 = 100.0;
/// Mass is `radius * k` with `k` drawn from 1..=MAX_MASS_MULTIPLIER.
pub const MAX_MASS_MULTIPLIER: u32 = 16;
pub const DEFAULT_SEED: u64 = 2;

// ====================
// Runner
// ====================
pub const TARGET_FPS: f32 = 60.0;
pub const SIM_THREADS: usize = 2; // Worker threads for the per-body passes
pub const LOG_INTERVAL: u64 = 60; // Frames between diagnostics reports
pub const DEFAULT_TICKS: u64 = 600;

/// Physics parameters read by the step driver every tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub gravitational_constant: f32,
    pub softening: f32,
    pub collision_iterations: usize,
    pub domain_width: f32,
    pub domain_height: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            softening: SOFTENING,
            collision_iterations: COLLISION_ITERATIONS,
            domain_width: DOMAIN_WIDTH,
            domain_height: DOMAIN_HEIGHT,
        }
    }
}

impl SimConfig {
    /// Reject parameters that would make the force model or the wrap rules meaningless.
    pub fn validate(&self) -> Result<(), InitError> {
        validate_domain(self.domain_width, self.domain_height)?;
        if !(self.softening.is_finite() && self.softening > 0.0) {
            return Err(InitError::InvalidSoftening(self.softening));
        }
        if !self.gravitational_constant.is_finite() {
            return Err(InitError::InvalidGravitationalConstant(self.gravitational_constant));
        }
        Ok(())
    }
}

pub(crate) fn validate_domain(width: f32, height: f32) -> Result<(), InitError> {
    let ok = |v: f32| v.is_finite() && v > 0.0;
    if ok(width) && ok(height) {
        Ok(())
    } else {
        Err(InitError::InvalidDomain { width, height })
    }
}
