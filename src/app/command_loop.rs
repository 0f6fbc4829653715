// app/command_loop.rs
// Applies SimCommand messages to the loop state between ticks

use super::state::SimCommand;
use crate::simulation::OverrideEvent;

/// Loop-side state that commands act on. Override events are queued and
/// handed to the next tick in arrival order.
#[derive(Debug, Default)]
pub struct LoopState {
    pub paused: bool,
    pub step_once: bool,
    pub shutdown: bool,
    pub pending: Vec<OverrideEvent>,
}

impl LoopState {
    /// True if the next loop iteration should run a tick.
    pub fn should_step(&self) -> bool {
        !self.shutdown && (!self.paused || self.step_once)
    }

    pub fn take_events(&mut self) -> Vec<OverrideEvent> {
        std::mem::take(&mut self.pending)
    }
}

pub fn handle_command(cmd: SimCommand, state: &mut LoopState) {
    match cmd {
        SimCommand::Override(event) => state.pending.push(event),
        SimCommand::Pause => {
            log::debug!("simulation paused");
            state.paused = true;
        }
        SimCommand::Resume => {
            log::debug!("simulation resumed");
            state.paused = false;
        }
        SimCommand::StepOnce => {
            if state.paused {
                state.step_once = true;
            }
        }
        SimCommand::Shutdown => {
            log::debug!("shutdown requested");
            state.shutdown = true;
        }
    }
}
