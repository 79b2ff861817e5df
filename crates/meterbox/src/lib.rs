//! Top-level facade crate for meterbox.
//!
//! Re-exports the core registry and the runtime wiring so users can depend on a single crate.

pub mod core {
    pub use meterbox_core::*;
}

pub mod runtime {
    pub use meterbox_runtime::*;
}
