//! Packet generator configuration.
//!
//! Drives the simulated fleet used when no replay file is given: which edge
//! nodes emit packets, which of them is flaky, and how often a packet gets
//! mangled on its way to the aggregation node.

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

use crate::validation;

#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct SimulatorConfig {
    /// Seed for deterministic fault injection.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Emitting devices, visited round-robin.
    #[validate(length(min = 1))]
    #[validate(custom(function = validation::validate_sources))]
    #[serde(default = "default_sources")]
    pub sources: Vec<String>,

    /// Device that periodically reports problems.
    #[serde(default = "default_anomaly_source")]
    pub anomaly_source: Option<String>,

    /// Payload sent by the anomaly source when it misbehaves.
    #[validate(length(min = 1))]
    #[serde(default = "default_anomaly_payload")]
    pub anomaly_payload: String,

    /// Probability that a generated packet loses a required field.
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(default)]
    pub fault_probability: f64,
}

fn default_seed() -> u64 {
    42
}

fn default_sources() -> Vec<String> {
    vec![
        "ESP8266-NODE-007".into(),
        "ESP8266-NODE-015".into(),
        "NODEMCU-RPT-004".into(),
        "RPI3-NODE-001".into(),
    ]
}

fn default_anomaly_source() -> Option<String> {
    Some("ESP8266-NODE-007".into())
}

fn default_anomaly_payload() -> String {
    "critical sensor timeout".into()
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            sources: default_sources(),
            anomaly_source: default_anomaly_source(),
            anomaly_payload: default_anomaly_payload(),
            fault_probability: 0.0,
        }
    }
}
