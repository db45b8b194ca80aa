//! Observability configuration.

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

use crate::validation;

/// Telemetry configuration.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct TelemetryConfig {
    /// Log output format (`pretty` or `json`).
    #[validate(custom(function = validation::validate_log_format))]
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Dump Prometheus metrics to the log on shutdown.
    #[serde(default)]
    pub metrics_enabled: bool,
}

fn default_log_format() -> String {
    "pretty".into()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_format: default_log_format(),
            metrics_enabled: false,
        }
    }
}
