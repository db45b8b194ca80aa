use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulatorError {
    #[error("Failed to open replay file {path}: {source}")]
    ReplayOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
