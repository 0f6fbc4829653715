// simulation/mod.rs
// Re-exports and module declarations for simulation submodules

pub mod accumulator;
pub mod boundary;
pub mod collision;
pub mod forces;
pub mod integrator;
pub mod simulation;
pub use simulation::*;

#[cfg(test)]
mod tests;
