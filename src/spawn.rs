// spawn.rs
// Creates the initial body population from a seed

use crate::body::{Body, Color};
use crate::config;
use crate::error::InitError;
use serde::{Deserialize, Serialize};
use ultraviolet::Vec2;

/// Parameters for a randomly scattered population.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub count: usize,
    pub radius: f32,
    /// Velocity components are uniform in `[-speed, speed)`.
    pub speed: f32,
    /// Mass is `radius * k`, `k` uniform in `1..=max_mass_multiplier`.
    pub max_mass_multiplier: u32,
    pub seed: u64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            count: config::BODY_COUNT,
            radius: config::BODY_RADIUS,
            speed: config::INITIAL_SPEED,
            max_mass_multiplier: config::MAX_MASS_MULTIPLIER,
            seed: config::DEFAULT_SEED,
        }
    }
}

impl SpawnConfig {
    pub fn validate(&self) -> Result<(), InitError> {
        if self.count == 0 {
            return Err(InitError::EmptyPopulation);
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(InitError::InvalidRadius(self.radius));
        }
        if self.max_mass_multiplier == 0 {
            return Err(InitError::InvalidMassMultiplier(self.max_mass_multiplier));
        }
        Ok(())
    }
}

/// `count` bodies scattered uniformly over a `width` x `height` domain with
/// the default radius, speed and mass range. The same seed always yields the
/// same population.
pub fn initialize(count: usize, width: f32, height: f32, seed: u64) -> Result<Vec<Body>, InitError> {
    let spawn = SpawnConfig {
        count,
        seed,
        ..SpawnConfig::default()
    };
    random_bodies(&spawn, width, height)
}

pub fn random_bodies(spawn: &SpawnConfig, width: f32, height: f32) -> Result<Vec<Body>, InitError> {
    spawn.validate()?;
    config::validate_domain(width, height)?;

    let mut rng = fastrand::Rng::with_seed(spawn.seed);
    let bodies = (0..spawn.count)
        .map(|_| {
            // One byte drives both the mass class and the red channel,
            // so heavier bodies read redder on screen.
            let shade = rng.u8(..);
            let pos = Vec2::new(rng.f32() * width, rng.f32() * height);
            let vel = Vec2::new(
                (rng.f32() * 2.0 - 1.0) * spawn.speed,
                (rng.f32() * 2.0 - 1.0) * spawn.speed,
            );
            let multiplier = 1 + (shade as u32 * spawn.max_mass_multiplier) / 256;
            let mass = spawn.radius * multiplier as f32;
            let color = Color::new(shade, rng.u8(..), rng.u8(..), 255);
            Body::new(pos, vel, spawn.radius, mass, color)
        })
        .collect::<Vec<_>>();

    log::debug!(
        "spawned {} bodies in {}x{} (seed {})",
        bodies.len(),
        width,
        height,
        spawn.seed
    );
    Ok(bodies)
}
