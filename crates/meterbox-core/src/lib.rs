//! meterbox core: process-local metrics registry.
//!
//! Application code registers named counter, gauge and histogram families
//! once at startup, then records observations by name and label values from
//! any number of threads. Exporters read the accumulated state through
//! [`MetricsRegistry::snapshot`].
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Registration
//! surfaces bad input as `MeterboxError`; recording never returns an error
//! and never panics on unknown names or label mismatches.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod metric;
pub mod registry;
pub mod snapshot;

pub use error::{ErrorCode, MeterboxError, Result};
pub use metric::{Descriptor, Labels, MetricKind, DEFAULT_BUCKETS};
pub use registry::{new_shared_registry, MetricsRegistry, SharedRegistry};
pub use snapshot::{
    BucketCount, FamilySnapshot, HistogramValue, RegistrySnapshot, SeriesSnapshot, SeriesValue,
};
