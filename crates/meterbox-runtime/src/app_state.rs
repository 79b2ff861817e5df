//! Shared application state: the config and the process-wide registry.
//!
//! Every configured family is registered here, before any recording starts.
//! Any registration error aborts startup.

use std::sync::Arc;

use meterbox_core::error::Result;
use meterbox_core::{new_shared_registry, SharedRegistry};

use crate::config::MeterboxConfig;
use crate::obs::LEVEL_LABEL;

const LOG_COUNT_HELP: &str = "Number of log events by level.";

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    metrics: SharedRegistry,
}

struct AppStateInner {
    cfg: MeterboxConfig,
}

impl AppState {
    /// Build application state and register configured metric families.
    pub fn new(cfg: MeterboxConfig) -> Result<Self> {
        let metrics = new_shared_registry();

        // 1) Families declared in config
        for def in &cfg.metrics.counters {
            metrics.register_counter(&def.name, &def.help, &as_strs(&def.labels))?;
        }
        for def in &cfg.metrics.gauges {
            metrics.register_gauge(&def.name, &def.help, &as_strs(&def.labels))?;
        }
        for def in &cfg.metrics.histograms {
            metrics.register_histogram(&def.name, &def.help, &def.buckets, &as_strs(&def.labels))?;
        }

        // 2) Log event counter
        if cfg.logging.count_events {
            metrics.register_counter(&cfg.logging.count_metric, LOG_COUNT_HELP, &[LEVEL_LABEL])?;
        }

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg }),
            metrics,
        })
    }

    pub fn cfg(&self) -> &MeterboxConfig {
        &self.inner.cfg
    }

    pub fn metrics(&self) -> SharedRegistry {
        Arc::clone(&self.metrics)
    }
}

fn as_strs(v: &[String]) -> Vec<&str> {
    v.iter().map(String::as_str).collect()
}
