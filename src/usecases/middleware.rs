//! Request Timing - Middleware Use Case
//!
//! Times one request cycle end to end and guarantees exactly one
//! histogram sample per dispatched request, tagged with method,
//! status code, and path — also when the handler fails or hits an
//! ignorable transport condition (e.g. the client disconnected).

use std::sync::Arc;

use tracing::debug;

use crate::ports::http::{HandlerError, RequestCycle};
use crate::usecases::reporter::Reporter;

/// Metric name for request duration histograms.
pub const REQUEST_METRIC: &str = "http.request";

type Classifier = dyn Fn(&HandlerError) -> bool + Send + Sync;

/// Per-request timing over the `RequestCycle` port.
pub struct RequestTiming {
  reporter: Arc<Reporter>,
  is_ignorable: Option<Arc<Classifier>>,
}

impl RequestTiming {
  /// Timing without a failure classifier: every handler failure is
  /// forwarded to the framework's error path.
  pub fn new(reporter: Arc<Reporter>) -> Self {
    Self { reporter, is_ignorable: None }
  }

  /// Timing with a classifier marking failures that should be
  /// swallowed instead of forwarded (transport disconnects and the
  /// like).
  pub fn with_classifier(
    reporter: Arc<Reporter>,
    classifier: impl Fn(&HandlerError) -> bool + Send + Sync + 'static,
  ) -> Self {
    Self { reporter, is_ignorable: Some(Arc::new(classifier)) }
  }

  /// Run one request cycle under a timer.
  ///
  /// Always completes timing, whichever branch the handler outcome
  /// takes, and never fails itself: handler failures surface only
  /// through the framework side channel via `forward_error`.
  pub async fn handle<C: RequestCycle + ?Sized>(&self, cycle: &mut C) {
    let method_tag = format!("method:{}", cycle.method());
    let timer = self.reporter.new_timer(REQUEST_METRIC, &[method_tag.as_str()]);

    if let Err(err) = cycle.dispatch().await {
      match &self.is_ignorable {
        Some(classify) if classify(&err) => {
          // Client went away mid-response; end the cycle cleanly
          // without feeding the framework's error handler.
          debug!(error = %err, "ignorable handler failure suppressed");
        }
        _ => cycle.forward_error(err),
      }
    }

    let status_tag = format!("status_code:{}", cycle.status());
    let path_tag = format!("path:{}", cycle.route());
    timer.end(&[status_tag.as_str(), path_tag.as_str()]);
  }
}
