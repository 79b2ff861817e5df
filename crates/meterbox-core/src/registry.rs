//! Metrics registry.
//!
//! One flat namespace split into three name -> family maps. Registration is
//! expected at startup and returns `Err` on bad input; recording never fails
//! from the caller's point of view: unknown names and label mismatches are
//! logged with `tracing::warn!` and the observation is dropped.
//!
//! Locking:
//! - name -> family maps are `DashMap`s; recording clones the family `Arc`
//!   and releases the map shard before touching series.
//! - registration takes `register_lock` so the cross-kind uniqueness check
//!   and the insert happen as one step.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;

use crate::error::{MeterboxError, Result};
use crate::metric::counter::CounterSeries;
use crate::metric::family::{Descriptor, Family, MetricKind};
use crate::metric::gauge::GaugeSeries;
use crate::metric::histogram::{validate_bounds, HistogramFamily};
use crate::metric::labels::Labels;
use crate::snapshot::{FamilySnapshot, HistogramValue, RegistrySnapshot, SeriesSnapshot, SeriesValue};

/// Registry shared by reference across the process.
pub type SharedRegistry = Arc<MetricsRegistry>;

/// Create a new shared registry.
pub fn new_shared_registry() -> SharedRegistry {
    Arc::new(MetricsRegistry::new())
}

#[derive(Default)]
pub struct MetricsRegistry {
    counters: DashMap<String, Arc<Family<CounterSeries>>>,
    gauges: DashMap<String, Arc<Family<GaugeSeries>>>,
    histograms: DashMap<String, Arc<HistogramFamily>>,
    register_lock: Mutex<()>,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // --------------------
    // Registration
    // --------------------

    /// Register a counter family.
    pub fn register_counter(&self, name: &str, help: &str, label_names: &[&str]) -> Result<()> {
        let desc = Descriptor::new(MetricKind::Counter, name, help, label_names)?;
        self.insert_unique(name, || {
            self.counters
                .insert(name.to_string(), Arc::new(Family::new(desc)));
        })
    }

    /// Register a gauge family.
    pub fn register_gauge(&self, name: &str, help: &str, label_names: &[&str]) -> Result<()> {
        let desc = Descriptor::new(MetricKind::Gauge, name, help, label_names)?;
        self.insert_unique(name, || {
            self.gauges
                .insert(name.to_string(), Arc::new(Family::new(desc)));
        })
    }

    /// Register a histogram family with fixed bucket bounds.
    pub fn register_histogram(
        &self,
        name: &str,
        help: &str,
        bucket_bounds: &[f64],
        label_names: &[&str],
    ) -> Result<()> {
        let desc = Descriptor::new(MetricKind::Histogram, name, help, label_names)?;
        validate_bounds(bucket_bounds)?;
        self.insert_unique(name, || {
            let family = HistogramFamily::new(Family::new(desc), bucket_bounds);
            self.histograms.insert(name.to_string(), Arc::new(family));
        })
    }

    fn insert_unique(&self, name: &str, insert: impl FnOnce()) -> Result<()> {
        let _guard = self.register_lock.lock();
        if self.contains(name) {
            return Err(MeterboxError::DuplicateName(name.to_string()));
        }
        insert();
        tracing::debug!(metric = name, "metric family registered");
        Ok(())
    }

    // --------------------
    // Recording (best effort, never fails)
    // --------------------

    /// Add `delta` to the counter series selected by positional label values.
    pub fn count(&self, name: &str, delta: f64, labels: &[&str]) {
        let Some(family) = self.counter_family(name) else {
            tracing::warn!(metric = name, "counter not found");
            return;
        };
        if let Err(e) = family.with_series(labels, CounterSeries::default, |s| s.add(delta)) {
            tracing::warn!(metric = name, ?labels, error = %e, "counter not found");
        }
    }

    /// Add `delta` to the counter series selected by named labels.
    pub fn count_with(&self, name: &str, delta: f64, labels: &Labels) {
        let Some(family) = self.counter_family(name) else {
            tracing::warn!(metric = name, "counter not found");
            return;
        };
        if let Err(e) = family.with_labeled_series(labels, CounterSeries::default, |s| s.add(delta)) {
            tracing::warn!(metric = name, ?labels, error = %e, "counter not found");
        }
    }

    /// Set the gauge series selected by positional label values.
    pub fn set_gauge(&self, name: &str, value: f64, labels: &[&str]) {
        let Some(family) = self.gauge_family(name) else {
            tracing::warn!(metric = name, "gauge not found");
            return;
        };
        if let Err(e) = family.with_series(labels, GaugeSeries::default, |s| s.set(value)) {
            tracing::warn!(metric = name, ?labels, error = %e, "gauge not found");
        }
    }

    /// Set the gauge series selected by named labels.
    pub fn set_gauge_with(&self, name: &str, value: f64, labels: &Labels) {
        let Some(family) = self.gauge_family(name) else {
            tracing::warn!(metric = name, "gauge not found");
            return;
        };
        if let Err(e) = family.with_labeled_series(labels, GaugeSeries::default, |s| s.set(value)) {
            tracing::warn!(metric = name, ?labels, error = %e, "gauge not found");
        }
    }

    /// Observe `value` on the histogram series selected by positional label values.
    pub fn observe_histogram(&self, name: &str, value: f64, labels: &[&str]) {
        let Some(hist) = self.histogram_family(name) else {
            tracing::warn!(metric = name, "histogram not found");
            return;
        };
        let res = hist
            .family()
            .with_series(labels, || hist.new_series(), |s| s.observe(value));
        if let Err(e) = res {
            tracing::warn!(metric = name, ?labels, error = %e, "histogram not found");
        }
    }

    /// Observe `value` on the histogram series selected by named labels.
    pub fn observe_histogram_with(&self, name: &str, value: f64, labels: &Labels) {
        let Some(hist) = self.histogram_family(name) else {
            tracing::warn!(metric = name, "histogram not found");
            return;
        };
        let res = hist
            .family()
            .with_labeled_series(labels, || hist.new_series(), |s| s.observe(value));
        if let Err(e) = res {
            tracing::warn!(metric = name, ?labels, error = %e, "histogram not found");
        }
    }

    fn counter_family(&self, name: &str) -> Option<Arc<Family<CounterSeries>>> {
        self.counters.get(name).map(|r| Arc::clone(r.value()))
    }

    fn gauge_family(&self, name: &str) -> Option<Arc<Family<GaugeSeries>>> {
        self.gauges.get(name).map(|r| Arc::clone(r.value()))
    }

    fn histogram_family(&self, name: &str) -> Option<Arc<HistogramFamily>> {
        self.histograms.get(name).map(|r| Arc::clone(r.value()))
    }

    // --------------------
    // Reads (never create series)
    // --------------------

    /// Whether any family of any kind uses `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.counters.contains_key(name)
            || self.gauges.contains_key(name)
            || self.histograms.contains_key(name)
    }

    pub fn kind_of(&self, name: &str) -> Option<MetricKind> {
        if self.counters.contains_key(name) {
            Some(MetricKind::Counter)
        } else if self.gauges.contains_key(name) {
            Some(MetricKind::Gauge)
        } else if self.histograms.contains_key(name) {
            Some(MetricKind::Histogram)
        } else {
            None
        }
    }

    /// Descriptor of a registered family.
    pub fn descriptor(&self, name: &str) -> Option<Descriptor> {
        if let Some(f) = self.counter_family(name) {
            return Some(f.descriptor().clone());
        }
        if let Some(f) = self.gauge_family(name) {
            return Some(f.descriptor().clone());
        }
        self.histogram_family(name)
            .map(|h| h.family().descriptor().clone())
    }

    /// Number of registered families.
    pub fn len(&self) -> usize {
        self.counters.len() + self.gauges.len() + self.histograms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn counter_value(&self, name: &str, labels: &[&str]) -> Option<f64> {
        self.counter_family(name)?.read(labels, |s| s.get())
    }

    pub fn gauge_value(&self, name: &str, labels: &[&str]) -> Option<f64> {
        self.gauge_family(name)?.read(labels, |s| s.get())
    }

    pub fn histogram_value(&self, name: &str, labels: &[&str]) -> Option<HistogramValue> {
        self.histogram_family(name)?
            .family()
            .read(labels, |s| s.value())
    }

    /// Copy out every family and materialized series, sorted by family name
    /// then label tuple.
    pub fn snapshot(&self) -> RegistrySnapshot {
        let counters: Vec<_> = self.counters.iter().map(|r| Arc::clone(r.value())).collect();
        let gauges: Vec<_> = self.gauges.iter().map(|r| Arc::clone(r.value())).collect();
        let histograms: Vec<_> = self.histograms.iter().map(|r| Arc::clone(r.value())).collect();

        let mut families = Vec::with_capacity(counters.len() + gauges.len() + histograms.len());
        for f in &counters {
            let series = f.collect(|s| SeriesValue::Counter { value: s.get() });
            families.push(family_snapshot(f.descriptor(), None, series));
        }
        for f in &gauges {
            let series = f.collect(|s| SeriesValue::Gauge { value: s.get() });
            families.push(family_snapshot(f.descriptor(), None, series));
        }
        for h in &histograms {
            let series = h.family().collect(|s| SeriesValue::Histogram(s.value()));
            families.push(family_snapshot(
                h.family().descriptor(),
                Some(h.bounds().to_vec()),
                series,
            ));
        }
        families.sort_by(|a, b| a.name.cmp(&b.name));

        RegistrySnapshot { families }
    }
}

fn family_snapshot(
    desc: &Descriptor,
    buckets: Option<Vec<f64>>,
    series: Vec<(Vec<String>, SeriesValue)>,
) -> FamilySnapshot {
    FamilySnapshot {
        name: desc.name.clone(),
        help: desc.help.clone(),
        kind: desc.kind,
        label_names: desc.label_names.clone(),
        buckets,
        series: series
            .into_iter()
            .map(|(labels, value)| SeriesSnapshot { labels, value })
            .collect(),
    }
}

impl fmt::Debug for MetricsRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let series: usize = self.counters.iter().map(|r| r.value().series_count()).sum::<usize>()
            + self.gauges.iter().map(|r| r.value().series_count()).sum::<usize>()
            + self
                .histograms
                .iter()
                .map(|r| r.value().family().series_count())
                .sum::<usize>();
        f.debug_struct("MetricsRegistry")
            .field("counters", &self.counters.len())
            .field("gauges", &self.gauges.len())
            .field("histograms", &self.histograms.len())
            .field("series", &series)
            .finish()
    }
}
