use std::path::PathBuf;

use fyrvakt_config::ConfigError;
use fyrvakt_detection::DetectionError;
use fyrvakt_simulator::SimulatorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Detection error: {0}")]
    Detection(#[from] DetectionError),

    #[error("Packet source error: {0}")]
    Source(#[from] SimulatorError),

    #[error("Status file {path}: {source}")]
    Status {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Status encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}
