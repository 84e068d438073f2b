//! DogStatsD Backend - UDP Collector Client
//!
//! Sends one DogStatsD datagram per metric event to a collector agent.
//! Fire-and-forget: no buffering, no retry, one `send` syscall per
//! event. The socket is connected once at construction; a bad address
//! or exhausted descriptors fail there, never during emission.

use std::net::UdpSocket;

use anyhow::{Context, Result};

use crate::error::MetricsError;
use crate::ports::backend::MetricBackend;

/// DogStatsD client over a connected UDP socket.
pub struct StatsdBackend {
    socket: UdpSocket,
    namespace: String,
    base_tags: Vec<String>,
}

impl StatsdBackend {
    /// Bind an ephemeral socket and connect it to `host:port`.
    ///
    /// `namespace` must already be normalized (dot-terminated);
    /// `base_tags` are prefixed before call tags on every datagram.
    pub fn new(
        host: &str,
        port: u16,
        namespace: String,
        base_tags: Vec<String>,
    ) -> Result<Self, MetricsError> {
        let address = format!("{host}:{port}");

        let socket = UdpSocket::bind("0.0.0.0:0").map_err(|source| {
            MetricsError::ConnectionSetup { address: address.clone(), source }
        })?;
        socket.connect(&address).map_err(|source| {
            MetricsError::ConnectionSetup { address: address.clone(), source }
        })?;

        Ok(Self { socket, namespace, base_tags })
    }

    fn send(&self, name: &str, value: &str, kind: &str, tags: &[String], rate: f64) -> Result<()> {
        let datagram = self.format_datagram(name, value, kind, tags, rate);
        self.socket
            .send(datagram.as_bytes())
            .map(|_| ())
            .context("udp send to collector failed")
    }

    /// Render `<namespace><name>:<value>|<kind>[|@<rate>]|#<tags>`.
    fn format_datagram(
        &self,
        name: &str,
        value: &str,
        kind: &str,
        tags: &[String],
        rate: f64,
    ) -> String {
        let mut out = format!("{}{}:{}|{}", self.namespace, name, value, kind);

        if (rate - 1.0).abs() > f64::EPSILON {
            out.push_str(&format!("|@{rate}"));
        }

        let tag_list = self.joined_tags(tags);
        if !tag_list.is_empty() {
            out.push_str("|#");
            out.push_str(&tag_list);
        }

        out
    }

    fn joined_tags(&self, tags: &[String]) -> String {
        let mut list = self.base_tags.join(",");
        for tag in tags {
            if !list.is_empty() {
                list.push(',');
            }
            list.push_str(tag);
        }
        list
    }
}

impl MetricBackend for StatsdBackend {
    fn count(&self, name: &str, value: i64, tags: &[String], rate: f64) -> Result<()> {
        self.send(name, &value.to_string(), "c", tags, rate)
    }

    fn gauge(&self, name: &str, value: f64, tags: &[String], rate: f64) -> Result<()> {
        self.send(name, &value.to_string(), "g", tags, rate)
    }

    fn histogram(&self, name: &str, value: f64, tags: &[String], rate: f64) -> Result<()> {
        self.send(name, &value.to_string(), "h", tags, rate)
    }

    fn close(&self) -> Result<()> {
        // UDP has nothing to flush; the socket closes on drop.
        Ok(())
    }
}
