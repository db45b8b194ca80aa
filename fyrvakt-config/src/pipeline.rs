//! Aggregation pipeline configuration.
//!
//! Tick cadence of the aggregation loop, the ordered list of analyzers to
//! enable, and the optional bound on the device health table.

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

use crate::validation;

/// Pipeline parameters.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct PipelineConfig {
    /// Interval between two ticks of the aggregation loop (milliseconds).
    #[validate(range(min = 10, max = 60_000))]
    #[serde(default = "default_packet_interval")]
    pub packet_interval_ms: u64,

    /// Analyzers to enable, in invocation order.
    #[validate(custom(function = validation::validate_analyzer_names))]
    #[serde(default = "default_analyzers")]
    pub enabled_analyzers: Vec<String>,

    /// Maximum number of tracked devices. Unbounded when absent; otherwise the
    /// least recently seen device is evicted to make room.
    #[validate(range(min = 1))]
    #[serde(default)]
    pub max_tracked_devices: Option<usize>,
}

fn default_packet_interval() -> u64 {
    1000
}

fn default_analyzers() -> Vec<String> {
    vec!["packet-analyzer".into(), "predictive-maintenance".into()]
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            packet_interval_ms: default_packet_interval(),
            enabled_analyzers: default_analyzers(),
            max_tracked_devices: None,
        }
    }
}
