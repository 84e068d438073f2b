//! Serverless Backend - Line Protocol Writer
//!
//! Formats each metric event as a pipe-delimited line and writes it to
//! an injected sink in a single call, for environments where no
//! collector agent is reachable and a log shipper parses the output:
//!
//! `MONITORING|<epoch_secs>|<value>|<kind>|<namespace><name>|#<tags>`
//!
//! The namespace already carries its trailing dot, so it is joined to
//! the metric name with no extra separator. Tag order is base tags
//! then call tags; downstream parsers rely on it.

use std::io::Write;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use chrono::Utc;

use crate::config::LineSink;
use crate::ports::backend::MetricBackend;

/// Textual protocol writer over any `Write + Send` sink.
///
/// The mutex makes each line an atomic write, so concurrent emissions
/// cannot interleave inside one line.
pub struct ServerlessBackend {
    namespace: String,
    base_tags: Vec<String>,
    sink: Mutex<LineSink>,
}

impl ServerlessBackend {
    /// Bind the backend to a sink. `namespace` must already be
    /// normalized (dot-terminated).
    pub fn new(sink: LineSink, namespace: String, base_tags: Vec<String>) -> Self {
        Self { namespace, base_tags, sink: Mutex::new(sink) }
    }

    fn send(&self, name: &str, value: &str, kind: &str, tags: &[String]) -> Result<()> {
        let line = self.format_line(Utc::now().timestamp(), name, value, kind, tags);

        let mut sink = self
            .sink
            .lock()
            .map_err(|_| anyhow!("metric sink mutex poisoned"))?;
        sink.write_all(line.as_bytes())
            .context("failed to write metric line")
    }

    /// Render one event. The timestamp is taken at formatting time,
    /// not at timer start. No trailing newline; the sink decides
    /// framing.
    fn format_line(
        &self,
        now: i64,
        name: &str,
        value: &str,
        kind: &str,
        tags: &[String],
    ) -> String {
        let mut tag_list = self.base_tags.join(",");
        for tag in tags {
            if !tag_list.is_empty() {
                tag_list.push(',');
            }
            tag_list.push_str(tag);
        }

        format!(
            "MONITORING|{now}|{value}|{kind}|{namespace}{name}|#{tag_list}",
            namespace = self.namespace,
        )
    }
}

impl MetricBackend for ServerlessBackend {
    fn count(&self, name: &str, value: i64, tags: &[String], _rate: f64) -> Result<()> {
        self.send(name, &value.to_string(), "count", tags)
    }

    fn gauge(&self, name: &str, value: f64, tags: &[String], _rate: f64) -> Result<()> {
        self.send(name, &value.to_string(), "gauge", tags)
    }

    fn histogram(&self, name: &str, value: f64, tags: &[String], _rate: f64) -> Result<()> {
        self.send(name, &value.to_string(), "histogram", tags)
    }

    fn close(&self) -> Result<()> {
        let mut sink = self
            .sink
            .lock()
            .map_err(|_| anyhow!("metric sink mutex poisoned"))?;
        sink.flush().context("failed to flush metric sink")
    }
}
