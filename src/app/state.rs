// app/state.rs
// Messages sent to the simulation thread and the frame it publishes back

use crate::body::BodyView;
use crate::simulation::OverrideEvent;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;

/// Commands sent from the presentation shell to the simulation thread.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimCommand {
    Override(OverrideEvent),
    Pause,
    Resume,
    /// Advance exactly one tick while paused.
    StepOnce,
    Shutdown,
}

/// Read-only copy of the state a renderer needs, refreshed after every tick.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Frame {
    pub frame: u64,
    pub time: f64,
    pub contacts: usize,
    pub held: Option<usize>,
    pub paused: bool,
    pub bodies: Vec<BodyView>,
}

pub type SharedFrame = Arc<Mutex<Frame>>;
