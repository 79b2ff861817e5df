use std::sync::atomic::{AtomicU64, Ordering};

/// One gauge time series (last write wins).
#[derive(Debug, Default)]
pub(crate) struct GaugeSeries {
    bits: AtomicU64,
}

impl GaugeSeries {
    pub(crate) fn set(&self, value: f64) {
        self.bits.store(value.to_bits(), Ordering::Relaxed);
    }

    pub(crate) fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }
}
