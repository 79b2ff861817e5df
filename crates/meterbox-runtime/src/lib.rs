//! meterbox runtime: startup wiring around the core registry.
//!
//! Loads the YAML config, registers the declared metric families into a
//! shared registry, and installs logging (including the log-event counter).
//! Consumed by the `meterbox` binary and by integration tests.

pub mod app_state;
pub mod config;
pub mod obs;
