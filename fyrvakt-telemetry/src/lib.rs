//! # fyrvakt Telemetry
//!
//! Crate for structured logging and Prometheus metrics of the analytics node.

pub mod logging;
pub mod metrics;

pub use logging::{EventLogger, LogFormat};
pub use metrics::MetricsRecorder;
