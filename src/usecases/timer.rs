//! Timer - Wall-clock Duration Instrument
//!
//! Captures a start instant and, on `end`, reports the elapsed
//! milliseconds as one histogram sample through the owning reporter.
//! `end` takes the timer by value, so a double report is a compile
//! error rather than a runtime caveat. A timer that is dropped
//! without `end` never reports.

use std::time::Instant;

use crate::usecases::reporter::Reporter;

/// One-shot timing instrument bound to a `Reporter`.
pub struct Timer<'a> {
  reporter: &'a Reporter,
  name: String,
  begin: Instant,
  tags: Vec<String>,
}

impl<'a> Timer<'a> {
  pub(crate) fn start(reporter: &'a Reporter, name: &str, tags: &[&str]) -> Self {
    Self {
      reporter,
      name: name.to_string(),
      begin: Instant::now(),
      tags: tags.iter().map(|t| (*t).to_string()).collect(),
    }
  }

  /// End the timer: append `additional_tags` to the tags captured at
  /// start, emit one histogram sample, and return the elapsed
  /// milliseconds (sub-millisecond precision truncates).
  pub fn end(mut self, additional_tags: &[&str]) -> u64 {
    let elapsed_ms = u64::try_from(self.begin.elapsed().as_millis()).unwrap_or(u64::MAX);

    self
      .tags
      .extend(additional_tags.iter().map(|t| (*t).to_string()));

    #[allow(clippy::cast_precision_loss)]
    self
      .reporter
      .report_histogram(&self.name, elapsed_ms as f64, &self.tags);

    elapsed_ms
  }
}
