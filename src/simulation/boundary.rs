//! Toroidal wrapping at the domain edges.
//!
//! A body is allowed to leave the domain by its own radius before it is
//! teleported to the opposite edge, so it slides fully out of view before
//! reappearing. The wrapped interval on each axis is `[-r, extent + r)`.

use crate::body::Body;
use rayon::prelude::*;

/// Wrap a single body. Velocity is left unchanged.
pub fn wrap(body: &mut Body, width: f32, height: f32) {
    let r = body.radius;
    body.pos.y = wrap_axis(body.pos.y, height, r);
    body.pos.x = wrap_axis(body.pos.x, width, r);
}

fn wrap_axis(value: f32, extent: f32, r: f32) -> f32 {
    if value >= extent + r {
        -r
    } else if value < -r {
        extent + r
    } else {
        value
    }
}

/// Wrap every body. Each body is independent, so this runs in parallel.
pub fn wrap_all(bodies: &mut [Body], width: f32, height: f32) {
    bodies
        .par_iter_mut()
        .for_each(|body| wrap(body, width, height));
}
