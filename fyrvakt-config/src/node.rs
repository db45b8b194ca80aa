//! Node identity configuration.
//!
//! Who this aggregation node is, as printed in the startup banner and in
//! diagnostics.

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

use crate::validation;

/// Identity and log verbosity of the node.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct NodeConfig {
    /// Unique identifier of this node.
    #[validate(custom(function = validation::validate_device_id))]
    #[serde(default = "default_device_id")]
    pub device_id: String,

    /// Human-readable name.
    #[validate(length(max = 128))]
    #[serde(default = "default_device_name")]
    pub device_name: String,

    /// Default log level when `RUST_LOG` is unset.
    #[validate(custom(function = validation::validate_log_level))]
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_device_id() -> String {
    "RPI4-NODE-001".into()
}

fn default_device_name() -> String {
    "Li-Fi Aggregation & Analytics Node".into()
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            device_id: default_device_id(),
            device_name: default_device_name(),
            log_level: default_log_level(),
        }
    }
}
