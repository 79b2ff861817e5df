//! meterbox
//!
//! Startup sequence only:
//! - load config (`METERBOX_CONFIG`, default `meterbox.yaml`)
//! - register configured metric families (fatal on error)
//! - install logging
//! - print the registry snapshot as JSON on stdout

use meterbox_runtime::{app_state::AppState, config, obs};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = config::config_path();
    let cfg = config::load_from_file(&path)?;

    let state = AppState::new(cfg)?;
    obs::init_logging(&state)?;

    let metrics = state.metrics();
    tracing::info!(config = %path, families = metrics.len(), "meterbox started");

    println!("{}", serde_json::to_string_pretty(&metrics.snapshot())?);
    Ok(())
}
