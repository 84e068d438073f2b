//! Request Cycle Port - HTTP Framework Interface
//!
//! Minimal view of one inbound request's lifecycle, so the timing
//! middleware stays framework-agnostic and testable without a real
//! HTTP stack. `adapters::http` implements it for axum.

use async_trait::async_trait;

/// Failure produced by a downstream handler.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// One request/response exchange as seen by the timing middleware.
#[async_trait]
pub trait RequestCycle: Send {
  /// Request verb (e.g. "GET").
  fn method(&self) -> String;

  /// Matched route template, falling back to the raw path.
  fn route(&self) -> String;

  /// Status code of the response as it currently stands. Zero before
  /// a response exists.
  fn status(&self) -> u16;

  /// Invoke the downstream handler. Must be called at most once per
  /// cycle; later calls are no-ops.
  async fn dispatch(&mut self) -> Result<(), HandlerError>;

  /// Hand a non-ignorable handler failure to the hosting framework's
  /// standard error path, mutating the response state.
  fn forward_error(&mut self, err: HandlerError);
}
