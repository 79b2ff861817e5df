//! Histogram series and bucket accounting.
//!
//! Buckets are cumulative: bucket `i` counts observations `<= bounds[i]`, and
//! one extra trailing slot counts every observation (`+Inf`). Accounting is
//! done by two pure functions so it can be tested without a registry.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{MeterboxError, Result};
use crate::snapshot::{BucketCount, HistogramValue};

use super::family::Family;

/// Prometheus client default buckets (seconds).
pub const DEFAULT_BUCKETS: [f64; 11] = [
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Bounds must be non-empty, finite and strictly ascending.
pub fn validate_bounds(bounds: &[f64]) -> Result<()> {
    if bounds.is_empty() {
        return Err(MeterboxError::InvalidBuckets("bounds must not be empty".into()));
    }
    if let Some(b) = bounds.iter().find(|b| !b.is_finite()) {
        return Err(MeterboxError::InvalidBuckets(format!("bound {b} is not finite")));
    }
    if let Some(w) = bounds.windows(2).find(|w| w[0] >= w[1]) {
        return Err(MeterboxError::InvalidBuckets(format!(
            "bounds must be strictly ascending ({} >= {})",
            w[0], w[1]
        )));
    }
    Ok(())
}

/// Index of the first bound `>= value`, or `bounds.len()` (the `+Inf` slot)
/// when the value exceeds every bound. NaN lands in `+Inf` only.
pub fn bucket_index(bounds: &[f64], value: f64) -> usize {
    if value.is_nan() {
        return bounds.len();
    }
    bounds.partition_point(|b| *b < value)
}

/// Add one observation to `cumulative` (length `bounds.len() + 1`).
pub fn accumulate(bounds: &[f64], cumulative: &mut [u64], value: f64) {
    let first = bucket_index(bounds, value);
    for c in cumulative.iter_mut().skip(first) {
        *c += 1;
    }
}

#[derive(Debug)]
struct HistogramState {
    cumulative: Vec<u64>,
    count: u64,
    sum: f64,
}

/// One histogram time series. The whole state sits behind one lock so
/// readers never see buckets, count and sum out of step.
#[derive(Debug)]
pub(crate) struct HistogramSeries {
    bounds: Arc<[f64]>,
    state: Mutex<HistogramState>,
}

impl HistogramSeries {
    pub(crate) fn new(bounds: Arc<[f64]>) -> Self {
        let slots = bounds.len() + 1;
        Self {
            bounds,
            state: Mutex::new(HistogramState {
                cumulative: vec![0; slots],
                count: 0,
                sum: 0.0,
            }),
        }
    }

    pub(crate) fn observe(&self, value: f64) {
        let mut state = self.state.lock();
        accumulate(&self.bounds, &mut state.cumulative, value);
        state.count += 1;
        state.sum += value;
    }

    pub(crate) fn value(&self) -> HistogramValue {
        let state = self.state.lock();
        HistogramValue {
            buckets: self
                .bounds
                .iter()
                .zip(state.cumulative.iter())
                .map(|(&upper_bound, &cumulative_count)| BucketCount {
                    upper_bound,
                    cumulative_count,
                })
                .collect(),
            count: state.count,
            sum: state.sum,
        }
    }
}

/// Histogram family: shared bounds plus the series map.
pub(crate) struct HistogramFamily {
    bounds: Arc<[f64]>,
    family: Family<HistogramSeries>,
}

impl HistogramFamily {
    pub(crate) fn new(family: Family<HistogramSeries>, bounds: &[f64]) -> Self {
        Self {
            bounds: Arc::from(bounds),
            family,
        }
    }

    pub(crate) fn bounds(&self) -> &[f64] {
        &self.bounds
    }

    pub(crate) fn family(&self) -> &Family<HistogramSeries> {
        &self.family
    }

    pub(crate) fn new_series(&self) -> HistogramSeries {
        HistogramSeries::new(Arc::clone(&self.bounds))
    }
}
