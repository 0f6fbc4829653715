//! Semi-implicit Euler integration under all-pairs gravity.
//!
//! A step runs in two phases so the parallel pass never observes a
//! half-updated sibling:
//!
//! 1. every free body's net acceleration is computed from the pre-step
//!    snapshot (read-only, in parallel);
//! 2. each free body commits its own `acc`, `vel`, `pos` (in parallel, each
//!    slot written only by the task that owns it).

use crate::body::Body;
use crate::profile_scope;
use rayon::prelude::*;
use ultraviolet::Vec2;

use super::accumulator::{compensated_add, CompensatedSum};
use super::forces::gravitational_force;

/// Net gravitational acceleration on `bodies[index]` from every other body.
pub fn net_acceleration(index: usize, bodies: &[Body], g: f32, softening: f32) -> Vec2 {
    let body = &bodies[index];
    let inv_mass = 1.0 / body.mass;
    bodies
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != index)
        .map(|(_, other)| gravitational_force(body, other, g, softening) * inv_mass)
        .collect::<CompensatedSum>()
        .sum()
}

/// Commit one step for a single body given its freshly computed acceleration.
/// Position advances with the already updated velocity.
pub fn advance(body: &mut Body, acc: Vec2, dt: f32) {
    body.acc = acc;
    body.vel = compensated_add(body.vel, acc * dt);
    body.pos = compensated_add(body.pos, body.vel * dt);
}

/// Integrate every body except `pinned` by one step of `dt`.
pub fn integrate(bodies: &mut [Body], pinned: Option<usize>, g: f32, softening: f32, dt: f32) {
    profile_scope!("integrate");
    let snapshot: &[Body] = bodies;
    let accelerations: Vec<Option<Vec2>> = (0..snapshot.len())
        .into_par_iter()
        .map(|i| {
            if Some(i) == pinned {
                None
            } else {
                Some(net_acceleration(i, snapshot, g, softening))
            }
        })
        .collect();

    bodies
        .par_iter_mut()
        .zip(accelerations.into_par_iter())
        .for_each(|(body, acc)| {
            if let Some(acc) = acc {
                advance(body, acc, dt);
            }
        });
}
