//! Config loader (strict parsing).

pub mod schema;

use std::fs;

use meterbox_core::error::{MeterboxError, Result};

pub use schema::{HistogramDef, LoggingSection, MeterboxConfig, MetricDef, MetricsSection};

/// Env var naming the config file read by the binary.
pub const CONFIG_ENV: &str = "METERBOX_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "meterbox.yaml";

pub fn load_from_file(path: &str) -> Result<MeterboxConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| MeterboxError::Internal(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<MeterboxConfig> {
    let cfg: MeterboxConfig = serde_yaml::from_str(s)
        .map_err(|e| MeterboxError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Config path from `METERBOX_CONFIG`, falling back to `meterbox.yaml`.
pub fn config_path() -> String {
    std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}
