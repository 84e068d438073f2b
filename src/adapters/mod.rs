//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies (UDP sockets, byte sinks, axum).
//!
//! Adapter categories:
//! - `statsd`: DogStatsD datagram client over UDP
//! - `serverless`: pipe-delimited line protocol over an injected sink
//! - `http`: axum middleware driving the request-timing use case

pub mod http;
pub mod serverless;
pub mod statsd;

pub use serverless::ServerlessBackend;
pub use statsd::StatsdBackend;
