//! Counter series: `f64` accumulator stored as bits in an `AtomicU64`.

use std::sync::atomic::{AtomicU64, Ordering};

/// One counter time series. Starts at 0.0 (all-zero bits).
#[derive(Debug, Default)]
pub(crate) struct CounterSeries {
    bits: AtomicU64,
}

impl CounterSeries {
    /// Add `delta`. Sign is not checked.
    pub(crate) fn add(&self, delta: f64) {
        // CAS loop; the closure always returns Some so this cannot fail.
        let _ = self
            .bits
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |bits| {
                Some((f64::from_bits(bits) + delta).to_bits())
            });
    }

    pub(crate) fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }
}
