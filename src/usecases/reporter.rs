//! Reporter - Best-effort Metrics Facade
//!
//! Owns exactly one backend (UDP collector or serverless writer,
//! chosen at construction) and exposes count/gauge/histogram. Backend
//! errors are never propagated: metrics must not break business
//! logic, so failures are logged at debug level and counted instead.
//!
//! A `Reporter` is read-mostly and shared across request handlers via
//! `Arc`; it holds no locks of its own because each emission is one
//! self-contained backend write.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, info};

use crate::adapters::serverless::ServerlessBackend;
use crate::adapters::statsd::StatsdBackend;
use crate::config::Config;
use crate::error::MetricsError;
use crate::ports::backend::MetricBackend;
use crate::usecases::timer::Timer;

/// Metrics reporting facade.
pub struct Reporter {
  backend: Box<dyn MetricBackend>,
  dropped: AtomicU64,
}

impl Reporter {
  /// Construct a reporter from configuration.
  ///
  /// Normalizes the namespace to end with `.` and selects the
  /// backend: the serverless line writer when `cfg.serverless` is
  /// set (requires `cfg.writer`), the UDP collector client
  /// otherwise. Base tags (environment, container, release) are
  /// attached to the backend and prefix every emission.
  ///
  /// # Errors
  /// - `MissingNamespace` when `cfg.namespace` is empty
  /// - `InvalidSink` when serverless mode has no writer
  /// - `ConnectionSetup` when the collector socket cannot be set up
  pub fn new(mut cfg: Config) -> Result<Self, MetricsError> {
    if cfg.namespace.is_empty() {
      return Err(MetricsError::MissingNamespace);
    }
    if !cfg.namespace.ends_with('.') {
      cfg.namespace.push('.');
    }

    let base_tags = vec![
      format!("environment:{}", cfg.environment),
      format!("container:{}", cfg.hostname),
      format!("release:{}", cfg.release),
    ];

    let backend: Box<dyn MetricBackend> = if cfg.serverless {
      let sink = cfg.writer.take().ok_or(MetricsError::InvalidSink)?;
      Box::new(ServerlessBackend::new(sink, cfg.namespace, base_tags))
    } else {
      Box::new(StatsdBackend::new(
        &cfg.statsd_host,
        cfg.statsd_port,
        cfg.namespace,
        base_tags,
      )?)
    };

    info!(serverless = cfg.serverless, "metrics reporter ready");

    Ok(Self::with_backend(backend))
  }

  /// Construct a reporter around an arbitrary backend. Namespace and
  /// base tags are the backend's concern; none are added here. Used
  /// by tests and by embedders with their own transport.
  pub fn with_backend(backend: Box<dyn MetricBackend>) -> Self {
    Self { backend, dropped: AtomicU64::new(0) }
  }

  /// Emit a counter increment. Sampling rate is fixed at 1.
  pub fn count(&self, name: &str, delta: i64, tags: &[&str]) {
    self.best_effort("count", self.backend.count(name, delta, &owned(tags), 1.0));
  }

  /// Emit an instantaneous value snapshot.
  pub fn gauge(&self, name: &str, value: f64, tags: &[&str]) {
    self.best_effort("gauge", self.backend.gauge(name, value, &owned(tags), 1.0));
  }

  /// Emit a distribution sample.
  pub fn histogram(&self, name: &str, value: f64, tags: &[&str]) {
    self.report_histogram(name, value, &owned(tags));
  }

  /// Start a timer that reports a histogram through this reporter
  /// when ended.
  pub fn new_timer(&self, name: &str, tags: &[&str]) -> Timer<'_> {
    Timer::start(self, name, tags)
  }

  /// Release backend resources. Errors are discarded like any other
  /// emission failure.
  pub fn close(&self) {
    self.best_effort("close", self.backend.close());
  }

  /// Number of emissions discarded so far because the backend failed.
  /// Observability for the observability layer.
  pub fn dropped(&self) -> u64 {
    self.dropped.load(Ordering::Relaxed)
  }

  pub(crate) fn report_histogram(&self, name: &str, value: f64, tags: &[String]) {
    self.best_effort("histogram", self.backend.histogram(name, value, tags, 1.0));
  }

  /// Convert any backend failure into a debug log and a drop count.
  fn best_effort(&self, op: &'static str, result: anyhow::Result<()>) {
    if let Err(err) = result {
      self.dropped.fetch_add(1, Ordering::Relaxed);
      debug!(op, error = %err, "metric emission dropped");
    }
  }
}

fn owned(tags: &[&str]) -> Vec<String> {
  tags.iter().map(|t| (*t).to_string()).collect()
}
