//! Configuration Module - Reporter Configuration
//!
//! Holds everything needed to construct a `Reporter`: identity tags
//! (environment, hostname, release), the metric namespace, and the
//! backend selection. The collector address comes from TOML or the
//! embedding service; the serverless output sink is injected in code
//! since a writer cannot come from a config file.

pub mod loader;

use std::fmt;
use std::io::{self, Write};

use serde::Deserialize;

/// Boxed byte sink for the serverless line protocol.
///
/// Wraps any `Write + Send` so `Config` stays debuggable and the
/// backend can own the writer behind a mutex.
pub struct LineSink(Box<dyn Write + Send>);

impl LineSink {
  /// Wrap a writer as a metric line sink.
  pub fn new(writer: impl Write + Send + 'static) -> Self {
    Self(Box::new(writer))
  }
}

impl fmt::Debug for LineSink {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("LineSink")
  }
}

impl Write for LineSink {
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    self.0.write(buf)
  }

  fn flush(&mut self) -> io::Result<()> {
    self.0.flush()
  }
}

/// Reporter configuration.
///
/// Validated once at `Reporter::new`; immutable afterwards.
#[derive(Debug, Deserialize)]
pub struct Config {
  /// Deployment environment (e.g. "production"). Emitted as the
  /// `environment:` base tag on every metric.
  #[serde(default)]
  pub environment: String,
  /// Host identifier, emitted as the `container:` base tag.
  #[serde(default)]
  pub hostname: String,
  /// Metric namespace prefix. Required, non-empty; a trailing `.` is
  /// appended during construction if absent.
  pub namespace: String,
  /// Release identifier, emitted as the `release:` base tag.
  #[serde(default)]
  pub release: String,
  /// Select the serverless line-protocol backend instead of the UDP
  /// collector. Requires `writer` to be set.
  #[serde(default)]
  pub serverless: bool,
  /// Collector host for the UDP backend.
  #[serde(default = "default_statsd_host")]
  pub statsd_host: String,
  /// Collector port for the UDP backend.
  #[serde(default = "default_statsd_port")]
  pub statsd_port: u16,
  /// Output sink for the serverless backend. Not loadable from TOML;
  /// set it after `load_config` when running serverless.
  #[serde(skip)]
  pub writer: Option<LineSink>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      environment: String::new(),
      hostname: String::new(),
      namespace: String::new(),
      release: String::new(),
      serverless: false,
      statsd_host: default_statsd_host(),
      statsd_port: default_statsd_port(),
      writer: None,
    }
  }
}

// Default value functions for serde

fn default_statsd_host() -> String {
  "127.0.0.1".to_string()
}

fn default_statsd_port() -> u16 {
  8125
}
