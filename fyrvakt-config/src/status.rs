//! Status export configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use validator::{self, Validate, ValidationError};

/// Where the network health status document is written.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct StatusConfig {
    /// Path of the transient status file, removed on shutdown.
    #[validate(custom(function = validate_status_path))]
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Pretty-print the JSON document.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_path() -> PathBuf {
    PathBuf::from("dashboard/status.json")
}

fn default_pretty() -> bool {
    true
}

fn validate_status_path(path: &Path) -> Result<(), ValidationError> {
    if path.file_name().is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("status_path_without_file_name"))
    }
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            pretty: default_pretty(),
        }
    }
}
