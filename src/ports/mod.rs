//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the reporting core requires
//! from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `MetricBackend`: The transport that turns a metric event into bytes
//! - `RequestCycle`: One HTTP request/response exchange, framework-agnostic

pub mod backend;
pub mod http;
