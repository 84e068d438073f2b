//! Metric Backend Port - Transport Interface
//!
//! The closed capability the facade dispatches to. Exactly two
//! adapters implement it: the DogStatsD UDP client and the serverless
//! line writer. The facade picks one at construction and never
//! branches on the concrete type afterwards.

use anyhow::Result;

/// Trait for metric transports.
///
/// Every method performs one self-contained, atomic write per event
/// (a single UDP send or a single sink write), so implementors need no
/// coordination with the facade. Errors are returned to the facade,
/// which discards them; metrics must never break request handling.
pub trait MetricBackend: Send + Sync {
  /// Emit a counter increment.
  fn count(&self, name: &str, value: i64, tags: &[String], rate: f64) -> Result<()>;

  /// Emit an instantaneous value snapshot.
  fn gauge(&self, name: &str, value: f64, tags: &[String], rate: f64) -> Result<()>;

  /// Emit a distribution sample.
  fn histogram(&self, name: &str, value: f64, tags: &[String], rate: f64) -> Result<()>;

  /// Release transport resources (flush a sink, drop a socket).
  fn close(&self) -> Result<()>;
}
