use crate::body::Body;
use crate::diagnostics::Diagnostics;
use crate::profile_scope;
use crate::simulation::Simulation;
use crossbeam::channel::{Receiver, RecvTimeoutError, TryRecvError};
use std::time::{Duration, Instant};

use super::command_loop::{self, LoopState};
use super::state::{SharedFrame, SimCommand};

const IDLE_WAIT: Duration = Duration::from_millis(5);
/// Smallest dt a real-time tick will report.
const MIN_DT: f32 = 1e-6;

/// How the loop chooses `dt` for each tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pacing {
    /// Measure wall time between ticks, capped at one target frame, and sleep
    /// so ticks do not outrun the target rate.
    RealTime { target_fps: f32 },
    /// Constant `dt`, ticks run back to back.
    Fixed { dt: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoopConfig {
    pub pacing: Pacing,
    /// Stop after the simulation reaches this frame.
    pub max_ticks: Option<u64>,
    /// Frames between diagnostics reports; 0 disables them.
    pub log_interval: u64,
}

struct Clock {
    pacing: Pacing,
    last: Instant,
}

impl Clock {
    fn new(pacing: Pacing) -> Self {
        Self {
            pacing,
            last: Instant::now(),
        }
    }

    fn reset(&mut self) {
        self.last = Instant::now();
    }

    fn tick(&mut self) -> f32 {
        match self.pacing {
            Pacing::Fixed { dt } => dt,
            Pacing::RealTime { target_fps } => {
                let now = Instant::now();
                let elapsed = (now - self.last).as_secs_f32();
                self.last = now;
                // Frame cap wins, but dt never drops below MIN_DT.
                elapsed.min(1.0 / target_fps).max(MIN_DT)
            }
        }
    }

    fn pace(&self) {
        if let Pacing::RealTime { target_fps } = self.pacing {
            let next = self.last + Duration::from_secs_f32(1.0 / target_fps);
            let now = Instant::now();
            if next > now {
                std::thread::sleep(next - now);
            }
        }
    }
}

/// Copy the current state into the shared frame the shell reads.
pub fn publish(simulation: &Simulation, state: &LoopState, frame: &SharedFrame) {
    let mut lock = frame.lock();
    lock.frame = simulation.frame;
    lock.time = simulation.time;
    lock.contacts = simulation.last_contacts();
    lock.held = simulation.held();
    lock.paused = state.paused;
    lock.bodies.clear();
    lock.bodies.extend(simulation.bodies().iter().map(Body::view));
}

fn drain_commands(rx: &Receiver<SimCommand>, state: &mut LoopState) {
    loop {
        match rx.try_recv() {
            Ok(cmd) => command_loop::handle_command(cmd, state),
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => {
                state.shutdown = true;
                break;
            }
        }
    }
}

/// Run ticks until shutdown, channel disconnect, or `max_ticks`; hands the
/// simulation back to the caller.
pub fn run_simulation_loop(
    rx: Receiver<SimCommand>,
    mut simulation: Simulation,
    frame: SharedFrame,
    config: LoopConfig,
) -> Simulation {
    let mut state = LoopState::default();
    let mut clock = Clock::new(config.pacing);
    publish(&simulation, &state, &frame);

    loop {
        drain_commands(&rx, &mut state);
        if state.shutdown {
            break;
        }
        if config.max_ticks.is_some_and(|max| simulation.frame >= max) {
            break;
        }

        if !state.should_step() {
            // Paused: block briefly instead of spinning.
            match rx.recv_timeout(IDLE_WAIT) {
                Ok(cmd) => command_loop::handle_command(cmd, &mut state),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => state.shutdown = true,
            }
            publish(&simulation, &state, &frame);
            clock.reset();
            continue;
        }
        state.step_once = false;

        let dt = clock.tick();
        let events = state.take_events();
        {
            profile_scope!("simulation_loop");
            simulation.step(dt, &events);
        }
        publish(&simulation, &state, &frame);

        if config.log_interval > 0 && simulation.frame % config.log_interval == 0 {
            let d = Diagnostics::measure(
                simulation.bodies(),
                &simulation.config,
                simulation.frame,
                simulation.time,
            );
            log::info!(
                "frame {:>6} t={:>7.2}s E={:.4e} (K={:.4e} U={:.4e}) |p|={:.3} contacts={} overlaps={}",
                d.frame,
                d.time,
                d.total_energy(),
                d.kinetic_energy,
                d.potential_energy,
                d.momentum.mag(),
                simulation.last_contacts(),
                d.overlaps
            );
            #[cfg(feature = "profiling")]
            crate::PROFILER.lock().log_and_clear();
        }

        clock.pace();
    }

    log::debug!("simulation loop exiting at frame {}", simulation.frame);
    simulation
}
