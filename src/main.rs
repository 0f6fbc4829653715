use gravity_sim::app;
use gravity_sim::init_config::{InitConfig, DEFAULT_PATH};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_PATH.to_string());
    let init = InitConfig::load_or_default(&path)?;
    let summary = app::run(&init)?;

    log::info!(
        "finished {} frames ({:.2}s simulated), relative energy drift {:+.3e}",
        summary.frames,
        summary.sim_time,
        summary.relative_energy_drift
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
