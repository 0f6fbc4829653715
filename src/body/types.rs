// body/types.rs
// Contains the Body struct, its read-only render view, and related methods

use palette::Srgba;
use serde::{Deserialize, Serialize};
use ultraviolet::Vec2;

/// Display colour carried on each body. The physics never reads it.
pub type Color = Srgba<u8>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
    pub radius: f32,
    pub mass: f32,
    pub color: Color,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, mass: f32, color: Color) -> Self {
        debug_assert!(radius > 0.0, "body radius must be positive");
        debug_assert!(mass > 0.0, "body mass must be positive");
        Self {
            pos,
            vel,
            acc: Vec2::zero(),
            radius,
            mass,
            color,
        }
    }

    /// Momentum `m * v`.
    pub fn momentum(&self) -> Vec2 {
        self.vel * self.mass
    }

    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.vel.mag_sq()
    }

    /// True if `point` lies inside (or on) this body's circle.
    pub fn contains(&self, point: Vec2) -> bool {
        (point - self.pos).mag_sq() <= self.radius * self.radius
    }

    /// True if the two circles interpenetrate.
    pub fn overlaps(&self, other: &Body) -> bool {
        (other.pos - self.pos).mag() < self.radius + other.radius
    }

    pub fn view(&self) -> BodyView {
        BodyView {
            pos: self.pos,
            radius: self.radius,
            color: self.color,
        }
    }
}

/// What a renderer needs to draw one body.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyView {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
}
