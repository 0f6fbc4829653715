//! Compensated (Kahan) summation for 2-D vectors.
//!
//! Every place that folds many small contributions into one vector goes
//! through [`CompensatedSum`]: the per-body force sum and the velocity and
//! position updates of the integrator. A fresh accumulator is made for each
//! independent sum and dropped once the result has been read.

use ultraviolet::Vec2;

/// Running sum plus the rounding error lost so far.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CompensatedSum {
    sum: Vec2,
    c: Vec2,
}

impl CompensatedSum {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: Vec2) {
        let y = value - self.c;
        let t = self.sum + y;
        // (t - sum) recovers the high part of y; subtracting y leaves the lost low part
        self.c = (t - self.sum) - y;
        self.sum = t;
    }

    pub fn sum(&self) -> Vec2 {
        self.sum
    }
}

impl Extend<Vec2> for CompensatedSum {
    fn extend<I: IntoIterator<Item = Vec2>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl FromIterator<Vec2> for CompensatedSum {
    fn from_iter<I: IntoIterator<Item = Vec2>>(iter: I) -> Self {
        let mut acc = Self::new();
        acc.extend(iter);
        acc
    }
}

/// Sum of `a` and `b` through a fresh accumulator.
pub fn compensated_add(a: Vec2, b: Vec2) -> Vec2 {
    let mut acc = CompensatedSum::new();
    acc.add(a);
    acc.add(b);
    acc.sum()
}
