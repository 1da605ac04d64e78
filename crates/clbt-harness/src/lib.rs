#![forbid(unsafe_code)]

//! Test harness for the CLBT overlay coordinator.
//!
//! - [`fixtures`]: ready-made coordinators over the recording host, a small
//!   property-test registry and the invariant checker.
//! - [`logs`]: capture `tracing` events emitted while a closure runs.

pub mod fixtures;
pub mod logs;

pub use fixtures::{Op, apply, check_invariants, coordinator_with, op_strategy, venue_coordinator};
pub use logs::{CapturedEvent, CapturedLogs, capture};
