//! Construction-time errors for the metrics facade.
//!
//! Only facade construction can fail. Emission-time transport errors
//! are discarded at the `Reporter` boundary and never reach callers.

use std::io;

use thiserror::Error;

/// Errors returned by `Reporter::new`.
#[derive(Debug, Error)]
pub enum MetricsError {
  /// The metric namespace was empty.
  #[error("namespace must be provided")]
  MissingNamespace,

  /// Serverless mode was selected but no output sink was supplied.
  #[error("serverless mode requires an output sink")]
  InvalidSink,

  /// The UDP socket could not be bound or connected to the collector.
  #[error("failed to set up collector connection to {address}")]
  ConnectionSetup {
    /// The `host:port` pair that was attempted.
    address: String,
    #[source]
    source: io::Error,
  },
}
