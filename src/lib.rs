//! metrics-relay — Best-effort Metrics Facade
//!
//! Reports counters, gauges, and timing histograms to a DogStatsD
//! collector over UDP, or writes a line-oriented text protocol to an
//! injected sink when running in serverless environments where no
//! agent is reachable. Includes a request-timing middleware for axum.
//!
//! Every emission is fire-and-forget: transport failures are logged
//! and counted, never surfaced to business logic.

pub mod adapters;
pub mod config;
pub mod error;
pub mod ports;
pub mod usecases;

pub use config::{Config, LineSink};
pub use error::MetricsError;
pub use usecases::middleware::RequestTiming;
pub use usecases::reporter::Reporter;
pub use usecases::timer::Timer;
