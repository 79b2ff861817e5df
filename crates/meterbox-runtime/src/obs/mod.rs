//! Logging setup.
//!
//! `tracing` + `tracing-subscriber`: an `EnvFilter` (from `RUST_LOG`, else the
//! configured level), the `fmt` layer on stderr, and optionally the
//! log-event counter.

pub mod log_counter;

pub use log_counter::{LogCountLayer, LEVEL_LABEL};

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use meterbox_core::error::{MeterboxError, Result};

use crate::app_state::AppState;

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(state: &AppState) -> Result<()> {
    let logging = &state.cfg().logging;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let counter = if logging.count_events {
        Some(LogCountLayer::new(state.metrics(), &logging.count_metric)?)
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(counter)
        .try_init()
        .map_err(|e| MeterboxError::Internal(format!("logging init failed: {e}")))
}
