// diagnostics.rs
// Conserved-quantity and contact diagnostics for a body population.

use crate::body::Body;
use crate::config::SimConfig;
use crate::simulation::accumulator::CompensatedSum;
use crate::simulation::forces::potential_energy;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use ultraviolet::Vec2;

/// A snapshot of global quantities, used to watch drift over a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub frame: u64,
    pub time: f64,
    pub kinetic_energy: f64,
    pub potential_energy: f64,
    pub momentum: Vec2,
    pub center_of_mass: Vec2,
    /// Pairs still interpenetrating after the last collision pass.
    pub overlaps: usize,
}

impl Diagnostics {
    pub fn measure(bodies: &[Body], config: &SimConfig, frame: u64, time: f64) -> Self {
        let kinetic_energy: f64 = bodies.iter().map(|b| b.kinetic_energy() as f64).sum();

        // Each pair counted once, from its lower index.
        let (potential_energy, overlaps) = (0..bodies.len())
            .into_par_iter()
            .map(|i| {
                let mut energy = 0.0f64;
                let mut overlaps = 0usize;
                for other in &bodies[i + 1..] {
                    energy += potential_energy(
                        &bodies[i],
                        other,
                        config.gravitational_constant,
                        config.softening,
                    ) as f64;
                    if bodies[i].overlaps(other) {
                        overlaps += 1;
                    }
                }
                (energy, overlaps)
            })
            .reduce(|| (0.0, 0), |a, b| (a.0 + b.0, a.1 + b.1));

        let momentum = bodies
            .iter()
            .map(Body::momentum)
            .collect::<CompensatedSum>()
            .sum();
        let total_mass: f32 = bodies.iter().map(|b| b.mass).sum();
        let center_of_mass = if total_mass > 0.0 {
            bodies
                .iter()
                .map(|b| b.pos * b.mass)
                .collect::<CompensatedSum>()
                .sum()
                / total_mass
        } else {
            Vec2::zero()
        };

        Self {
            frame,
            time,
            kinetic_energy,
            potential_energy,
            momentum,
            center_of_mass,
            overlaps,
        }
    }

    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy + self.potential_energy
    }
}
