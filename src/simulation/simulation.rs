// simulation/simulation.rs
// Contains the Simulation struct and main methods (new, step, override handling)

use crate::body::{Body, BodyView};
use crate::config::SimConfig;
use crate::error::InitError;
use crate::profile_scope;
use serde::{Deserialize, Serialize};
use ultraviolet::Vec2;

use super::boundary;
use super::collision;
use super::integrator;

/// Input from the presentation shell that takes one body out of the
/// gravitational integration and places it directly.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum OverrideEvent {
    /// Start holding body `index` at `position`.
    Begin { index: usize, position: Vec2 },
    /// The held body is now at `position`.
    Move { index: usize, position: Vec2 },
    /// Let go of body `index`; the pointer was last at `position`. The body
    /// is thrown with `(position - body.pos) / dt`.
    Release { index: usize, position: Vec2 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Grab {
    index: usize,
    position: Vec2,
}

/// The main simulation state. Owns the body population exclusively; callers
/// get read-only views between ticks.
pub struct Simulation {
    pub frame: u64,
    pub time: f64,
    pub config: SimConfig,
    bodies: Vec<Body>,
    grab: Option<Grab>,
    last_contacts: usize,
}

impl Simulation {
    pub fn new(bodies: Vec<Body>, config: SimConfig) -> Result<Self, InitError> {
        if bodies.is_empty() {
            return Err(InitError::EmptyPopulation);
        }
        for body in &bodies {
            if !(body.radius.is_finite() && body.radius > 0.0) {
                return Err(InitError::InvalidRadius(body.radius));
            }
            if !(body.mass.is_finite() && body.mass > 0.0) {
                return Err(InitError::InvalidMass(body.mass));
            }
        }
        config.validate()?;
        Ok(Self {
            frame: 0,
            time: 0.0,
            config,
            bodies,
            grab: None,
            last_contacts: 0,
        })
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    /// Render records for every body, in population order.
    pub fn snapshot(&self) -> Vec<BodyView> {
        self.bodies.iter().map(Body::view).collect()
    }

    /// Index of the body currently held by an override, if any.
    pub fn held(&self) -> Option<usize> {
        self.grab.map(|g| g.index)
    }

    /// Contacts resolved during the most recent step.
    pub fn last_contacts(&self) -> usize {
        self.last_contacts
    }

    /// First body whose circle contains `point`.
    pub fn pick(&self, point: Vec2) -> Option<usize> {
        self.bodies.iter().position(|b| b.contains(point))
    }

    pub fn into_bodies(self) -> Vec<Body> {
        self.bodies
    }

    /// Advance the simulation by one tick of `dt` seconds.
    ///
    /// Override events are applied in order before any physics runs. A held
    /// body is placed at its held position and skips integration, but still
    /// attracts the others, wraps and collides.
    pub fn step(&mut self, dt: f32, events: &[OverrideEvent]) {
        profile_scope!("simulation_step");
        if !(dt.is_finite() && dt > 0.0) {
            log::warn!("skipping tick with invalid dt {}", dt);
            return;
        }

        for event in events {
            self.apply_override(*event, dt);
        }
        if let Some(grab) = self.grab {
            self.bodies[grab.index].pos = grab.position;
        }

        let SimConfig {
            gravitational_constant,
            softening,
            collision_iterations,
            domain_width,
            domain_height,
        } = self.config;
        let pinned = self.held();

        integrator::integrate(
            &mut self.bodies,
            pinned,
            gravitational_constant,
            softening,
            dt,
        );
        boundary::wrap_all(&mut self.bodies, domain_width, domain_height);
        self.last_contacts = collision::resolve_all(&mut self.bodies, collision_iterations);

        self.frame += 1;
        self.time += dt as f64;
        log::trace!(
            "frame {} dt {:.5} contacts {}",
            self.frame,
            dt,
            self.last_contacts
        );
    }

    fn apply_override(&mut self, event: OverrideEvent, dt: f32) {
        match event {
            OverrideEvent::Begin { index, position } => {
                if index >= self.bodies.len() {
                    log::warn!("override of body {} ignored: only {} bodies", index, self.bodies.len());
                    return;
                }
                if let Some(previous) = self.grab {
                    log::debug!("body {} replaces held body {}", index, previous.index);
                }
                self.grab = Some(Grab { index, position });
            }
            OverrideEvent::Move { index, position } => match self.grab.as_mut() {
                Some(grab) if grab.index == index => grab.position = position,
                _ => log::warn!("move for body {} ignored: it is not held", index),
            },
            OverrideEvent::Release { index, position } => match self.grab {
                Some(grab) if grab.index == index => {
                    let body = &mut self.bodies[index];
                    body.vel = (position - body.pos) / dt;
                    self.grab = None;
                    log::debug!("body {} released with velocity {:?}", index, body.vel);
                }
                _ => log::warn!("release of body {} ignored: it is not held", index),
            },
        }
    }
}
