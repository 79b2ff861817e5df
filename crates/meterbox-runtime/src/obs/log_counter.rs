//! Counts emitted log events per level into a counter family.

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use meterbox_core::error::{MeterboxError, Result};
use meterbox_core::{MetricKind, SharedRegistry};

/// Label dimension of the log-event counter.
pub const LEVEL_LABEL: &str = "level";

/// `tracing` layer adding 1 to `metric{level=...}` for every event that
/// passes the filters in front of it.
pub struct LogCountLayer {
    registry: SharedRegistry,
    metric: String,
}

impl LogCountLayer {
    /// The family must already be a counter with exactly one label. A missing
    /// family would make every event log a "counter not found" warning,
    /// which is itself an event.
    pub fn new(registry: SharedRegistry, metric: impl Into<String>) -> Result<Self> {
        let metric = metric.into();
        match registry.descriptor(&metric) {
            Some(d) if d.kind == MetricKind::Counter && d.label_names.len() == 1 => {
                Ok(Self { registry, metric })
            }
            Some(_) => Err(MeterboxError::BadConfig(format!(
                "{metric} must be a counter with exactly one label"
            ))),
            None => Err(MeterboxError::BadConfig(format!(
                "{metric} is not registered"
            ))),
        }
    }
}

fn level_value(level: &Level) -> &'static str {
    if *level == Level::ERROR {
        "ERROR"
    } else if *level == Level::WARN {
        "WARN"
    } else if *level == Level::INFO {
        "INFO"
    } else if *level == Level::DEBUG {
        "DEBUG"
    } else {
        "TRACE"
    }
}

impl<S: Subscriber> Layer<S> for LogCountLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let level = level_value(event.metadata().level());
        self.registry.count(&self.metric, 1.0, &[level]);
    }
}
