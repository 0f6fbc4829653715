use crate::diagnostics::Diagnostics;
use crate::error::ConfigError;
use crate::init_config::InitConfig;
use crate::simulation::Simulation;
use crate::spawn::random_bodies;
use crossbeam::channel::{self, Sender};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use std::thread::JoinHandle;

pub mod command_loop;
pub mod simulation_loop;
pub mod state;

pub use simulation_loop::{LoopConfig, Pacing};
pub use state::{Frame, SharedFrame, SimCommand};

/// The presentation shell's side of a running simulation thread.
pub struct SimulationHandle {
    commands: Sender<SimCommand>,
    frame: SharedFrame,
    thread: JoinHandle<Simulation>,
}

impl SimulationHandle {
    /// Queue a command for the next tick. Returns false once the loop has exited.
    pub fn send(&self, cmd: SimCommand) -> bool {
        self.commands.send(cmd).is_ok()
    }

    /// Clone of the most recently published frame.
    pub fn latest_frame(&self) -> Frame {
        self.frame.lock().clone()
    }

    /// Borrow the latest frame without cloning the body list.
    pub fn with_frame<R>(&self, f: impl FnOnce(&Frame) -> R) -> R {
        f(&self.frame.lock())
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Ask the loop to stop after the current tick and take the simulation back.
    pub fn shutdown(self) -> Simulation {
        let _ = self.commands.send(SimCommand::Shutdown);
        self.join()
    }

    /// Wait for the loop to end on its own (tick limit reached).
    pub fn join(self) -> Simulation {
        match self.thread.join() {
            Ok(simulation) => simulation,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}

/// Move `simulation` onto its own thread and start ticking it.
pub fn spawn(simulation: Simulation, config: LoopConfig) -> SimulationHandle {
    let (tx, rx) = channel::unbounded();
    let frame: SharedFrame = Arc::new(Mutex::new(Frame::default()));
    let shared = Arc::clone(&frame);
    let thread = std::thread::spawn(move || {
        simulation_loop::run_simulation_loop(rx, simulation, shared, config)
    });
    SimulationHandle {
        commands: tx,
        frame,
        thread,
    }
}

/// Size the global rayon pool used by the per-body passes.
pub fn configure_threads(threads: usize) {
    let threads = threads.max(1);
    if let Err(err) = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
    {
        log::warn!("could not configure {} worker threads: {}", threads, err);
    }
}

/// What a headless run reports when it finishes.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub bodies: usize,
    pub frames: u64,
    pub sim_time: f64,
    pub start: Diagnostics,
    pub end: Diagnostics,
    /// `(E_end - E_start) / |E_start|`
    pub relative_energy_drift: f64,
}

/// Build the population described by `init` and run it to the configured tick count.
pub fn run(init: &InitConfig) -> Result<RunSummary, ConfigError> {
    let runner = init.runner_config();
    configure_threads(runner.threads);

    let sim_config = init.sim_config();
    let spawn_config = init.spawn_config();
    let bodies = random_bodies(
        &spawn_config,
        sim_config.domain_width,
        sim_config.domain_height,
    )?;
    let simulation = Simulation::new(bodies, sim_config)?;
    let start = Diagnostics::measure(simulation.bodies(), &simulation.config, 0, 0.0);
    log::info!(
        "{} bodies in {}x{}, seed {}, {} ticks",
        simulation.bodies().len(),
        simulation.config.domain_width,
        simulation.config.domain_height,
        spawn_config.seed,
        runner.ticks
    );

    let pacing = if runner.fixed_step {
        Pacing::Fixed {
            dt: 1.0 / runner.target_fps,
        }
    } else {
        Pacing::RealTime {
            target_fps: runner.target_fps,
        }
    };
    let handle = spawn(
        simulation,
        LoopConfig {
            pacing,
            max_ticks: Some(runner.ticks),
            log_interval: runner.log_interval,
        },
    );
    let simulation = handle.join();

    let end = Diagnostics::measure(
        simulation.bodies(),
        &simulation.config,
        simulation.frame,
        simulation.time,
    );
    let e0 = start.total_energy();
    let relative_energy_drift = if e0 != 0.0 {
        (end.total_energy() - e0) / e0.abs()
    } else {
        0.0
    };
    Ok(RunSummary {
        bodies: simulation.bodies().len(),
        frames: simulation.frame,
        sim_time: simulation.time,
        start,
        end,
        relative_energy_drift,
    })
}
