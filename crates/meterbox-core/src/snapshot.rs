//! Owned, serializable view of registry state for exporters.

use serde::Serialize;

use crate::metric::MetricKind;

/// All families, sorted by name.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RegistrySnapshot {
    pub families: Vec<FamilySnapshot>,
}

impl RegistrySnapshot {
    pub fn family(&self, name: &str) -> Option<&FamilySnapshot> {
        self.families.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FamilySnapshot {
    pub name: String,
    pub help: String,
    pub kind: MetricKind,
    pub label_names: Vec<String>,
    /// Bucket bounds, histograms only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buckets: Option<Vec<f64>>,
    /// Materialized series, sorted by label tuple.
    pub series: Vec<SeriesSnapshot>,
}

impl FamilySnapshot {
    pub fn series(&self, labels: &[&str]) -> Option<&SeriesSnapshot> {
        self.series.iter().find(|s| s.labels == labels)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesSnapshot {
    pub labels: Vec<String>,
    pub value: SeriesValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SeriesValue {
    Counter { value: f64 },
    Gauge { value: f64 },
    Histogram(HistogramValue),
}

/// Cumulative histogram state. The `+Inf` bucket is `count`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramValue {
    pub buckets: Vec<BucketCount>,
    pub count: u64,
    pub sum: f64,
}

impl HistogramValue {
    /// Cumulative counts at each finite bound, in bound order.
    pub fn cumulative_counts(&self) -> Vec<u64> {
        self.buckets.iter().map(|b| b.cumulative_count).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BucketCount {
    pub upper_bound: f64,
    pub cumulative_count: u64,
}
