//! Force calculation functions for the particle simulation.
//!
//! Provides the softened pairwise Newtonian gravity used by the integrator.

use crate::body::Body;
use ultraviolet::Vec2;

/// Gravitational force pulling `source` toward `target`.
///
/// - `softening` is added to the separation before squaring, which keeps the
///   force finite at contact and caps its magnitude at `g * m1 * m2 / softening²`.
/// - Coincident bodies exert no force on each other.
pub fn gravitational_force(source: &Body, target: &Body, g: f32, softening: f32) -> Vec2 {
    let d = target.pos - source.pos;
    let len = d.mag();
    if len == 0.0 {
        return Vec2::zero();
    }
    let distance = len + softening;
    let magnitude = (g * source.mass * target.mass) / (distance * distance);
    (d / len) * magnitude
}

/// Softened potential energy of a pair, consistent with [`gravitational_force`].
pub fn potential_energy(a: &Body, b: &Body, g: f32, softening: f32) -> f32 {
    let distance = (b.pos - a.pos).mag() + softening;
    -g * a.mass * b.mass / distance
}
