pub mod app;
pub mod body;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod init_config;
pub mod profiler;
pub mod simulation;
pub mod spawn;

pub use body::{Body, BodyView};
pub use error::{ConfigError, InitError};
pub use simulation::{OverrideEvent, Simulation};
pub use spawn::initialize;

#[cfg(feature = "profiling")]
use once_cell::sync::Lazy;
#[cfg(feature = "profiling")]
use parking_lot::Mutex;

#[cfg(feature = "profiling")]
pub static PROFILER: Lazy<Mutex<profiler::Profiler>> =
    Lazy::new(|| Mutex::new(profiler::Profiler::new()));
