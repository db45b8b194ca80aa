use thiserror::Error;

#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("Pattern compilation failed: {0}")]
    PatternError(String),

    #[error("analyzer \"{0}\" not found")]
    AnalyzerNotFound(String),

    #[error("analyzer \"{name}\" failed to initialize: {reason}")]
    AnalyzerInit { name: String, reason: String },
}
