//! Use Cases Layer - Reporting Logic
//!
//! Orchestrates the backend port into the operations services call.
//!
//! Use cases:
//! - `Reporter`: best-effort count/gauge/histogram facade
//! - `Timer`: wall-clock instrument reporting one histogram sample
//! - `RequestTiming`: per-request timing over the `RequestCycle` port

pub mod middleware;
pub mod reporter;
pub mod timer;
