use std::collections::HashSet;

use serde::Deserialize;
use meterbox_core::error::{MeterboxError, Result};
use meterbox_core::DEFAULT_BUCKETS;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeterboxConfig {
    pub version: u32,

    #[serde(default)]
    pub logging: LoggingSection,

    #[serde(default)]
    pub metrics: MetricsSection,
}

impl MeterboxConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MeterboxError::UnsupportedVersion(self.version));
        }

        self.logging.validate()?;
        self.metrics.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    /// Filter used when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default = "default_count_events")]
    pub count_events: bool,

    #[serde(default = "default_count_metric")]
    pub count_metric: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_level(),
            count_events: default_count_events(),
            count_metric: default_count_metric(),
        }
    }
}

impl LoggingSection {
    pub fn validate(&self) -> Result<()> {
        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&self.level.as_str()) {
            return Err(MeterboxError::BadConfig(format!(
                "logging.level must be one of {}",
                LEVELS.join(", ")
            )));
        }
        if self.count_metric.is_empty() {
            return Err(MeterboxError::BadConfig(
                "logging.count_metric must not be empty".into(),
            ));
        }
        Ok(())
    }
}

fn default_level() -> String {
    "info".into()
}
fn default_count_events() -> bool {
    true
}
fn default_count_metric() -> String {
    "log_count".into()
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct MetricsSection {
    #[serde(default)]
    pub counters: Vec<MetricDef>,
    #[serde(default)]
    pub gauges: Vec<MetricDef>,
    #[serde(default)]
    pub histograms: Vec<HistogramDef>,
}

impl MetricsSection {
    /// Names must be unique within the file. Name syntax, label names and
    /// bucket bounds are checked by the registry at registration.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        let names = self
            .counters
            .iter()
            .map(|d| d.name.as_str())
            .chain(self.gauges.iter().map(|d| d.name.as_str()))
            .chain(self.histograms.iter().map(|d| d.name.as_str()));
        for name in names {
            if !seen.insert(name) {
                return Err(MeterboxError::BadConfig(format!(
                    "metric {name} is declared more than once"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricDef {
    pub name: String,
    #[serde(default)]
    pub help: String,
    #[serde(default)]
    pub labels: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HistogramDef {
    pub name: String,
    #[serde(default)]
    pub help: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default = "default_buckets")]
    pub buckets: Vec<f64>,
}

fn default_buckets() -> Vec<f64> {
    DEFAULT_BUCKETS.to_vec()
}
