//! Metric families and series.
//!
//! - `family`: descriptors, name validation, label tuple -> series map
//! - `labels`: named label builder
//! - `counter` / `gauge` / `histogram`: per-series accumulators

pub mod family;
pub mod histogram;
pub mod labels;

pub(crate) mod counter;
pub(crate) mod gauge;

pub use family::{Descriptor, MetricKind};
pub use histogram::{accumulate, bucket_index, validate_bounds, DEFAULT_BUCKETS};
pub use labels::Labels;
