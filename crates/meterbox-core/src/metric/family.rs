//! Family bookkeeping shared by all metric kinds.
//!
//! A family owns its descriptor (name, help, ordered label names) and a
//! `DashMap` from label-value tuple to series. Series are created on first
//! observation through `entry().or_insert_with`, so concurrent first
//! observations of the same tuple produce exactly one series.

use dashmap::DashMap;
use serde::Serialize;

use crate::error::{MeterboxError, RecordError, Result};

use super::labels::Labels;

/// Metric kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    /// Monotonic accumulator.
    Counter,
    /// Last-write-wins value.
    Gauge,
    /// Cumulative bucketed distribution.
    Histogram,
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
            MetricKind::Histogram => "histogram",
        }
    }
}

/// Immutable identity of a registered family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub name: String,
    pub help: String,
    pub kind: MetricKind,
    pub label_names: Vec<String>,
}

impl Descriptor {
    /// Validate names and build a descriptor.
    pub fn new(kind: MetricKind, name: &str, help: &str, label_names: &[&str]) -> Result<Self> {
        validate_metric_name(name)?;
        validate_label_names(kind, label_names)?;
        Ok(Self {
            name: name.to_string(),
            help: help.to_string(),
            kind,
            label_names: label_names.iter().map(|s| s.to_string()).collect(),
        })
    }
}

// [a-zA-Z_:][a-zA-Z0-9_:]*
fn validate_metric_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let ok = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
        }
        _ => false,
    };
    if !ok {
        return Err(MeterboxError::InvalidName(name.to_string()));
    }
    Ok(())
}

// [a-zA-Z_][a-zA-Z0-9_]*, distinct, no "__" prefix, no "le" on histograms.
fn validate_label_names(kind: MetricKind, names: &[&str]) -> Result<()> {
    for (i, name) in names.iter().enumerate() {
        let mut chars = name.chars();
        let ok = match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            _ => false,
        };
        if !ok {
            return Err(MeterboxError::InvalidLabels(format!("malformed label name {name:?}")));
        }
        if name.starts_with("__") {
            return Err(MeterboxError::InvalidLabels(format!("label name {name} is reserved")));
        }
        if kind == MetricKind::Histogram && *name == "le" {
            return Err(MeterboxError::InvalidLabels(
                "label name le is reserved for histogram buckets".into(),
            ));
        }
        if names[..i].contains(name) {
            return Err(MeterboxError::InvalidLabels(format!("duplicate label name {name}")));
        }
    }
    Ok(())
}

/// Label tuple -> series map for one family.
pub(crate) struct Family<S> {
    desc: Descriptor,
    series: DashMap<Vec<String>, S>,
}

impl<S> Family<S> {
    pub(crate) fn new(desc: Descriptor) -> Self {
        Self {
            desc,
            series: DashMap::new(),
        }
    }

    pub(crate) fn descriptor(&self) -> &Descriptor {
        &self.desc
    }

    fn check_arity(&self, values: &[&str]) -> std::result::Result<(), RecordError> {
        let expected = self.desc.label_names.len();
        if values.len() != expected {
            return Err(RecordError::Arity {
                expected,
                got: values.len(),
            });
        }
        Ok(())
    }

    /// Resolve (or create) the series for `values` and run `f` on it.
    pub(crate) fn with_series<R>(
        &self,
        values: &[&str],
        init: impl FnOnce() -> S,
        f: impl FnOnce(&S) -> R,
    ) -> std::result::Result<R, RecordError> {
        self.check_arity(values)?;
        let key: Vec<String> = values.iter().map(|v| v.to_string()).collect();

        // Fast path: shard read lock only.
        if let Some(series) = self.series.get(&key) {
            return Ok(f(series.value()));
        }
        let series = self.series.entry(key).or_insert_with(init);
        Ok(f(series.value()))
    }

    /// Same as `with_series`, with label values given by name.
    pub(crate) fn with_labeled_series<R>(
        &self,
        labels: &Labels,
        init: impl FnOnce() -> S,
        f: impl FnOnce(&S) -> R,
    ) -> std::result::Result<R, RecordError> {
        let values = labels.resolve(&self.desc.label_names)?;
        self.with_series(&values, init, f)
    }

    /// Read an existing series. Never creates one.
    pub(crate) fn read<R>(&self, values: &[&str], f: impl FnOnce(&S) -> R) -> Option<R> {
        self.check_arity(values).ok()?;
        let key: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        self.series.get(&key).map(|s| f(s.value()))
    }

    /// Map every materialized series, sorted by label tuple.
    pub(crate) fn collect<R>(&self, mut f: impl FnMut(&S) -> R) -> Vec<(Vec<String>, R)> {
        let mut out: Vec<(Vec<String>, R)> = self
            .series
            .iter()
            .map(|e| (e.key().clone(), f(e.value())))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    pub(crate) fn series_count(&self) -> usize {
        self.series.len()
    }
}
