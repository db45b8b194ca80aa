//! # fyrvakt Detection Engine
//!
//! Pluggable analyzers run by the aggregation loop on every valid packet:
//! - `signal`: stateless signal-quality and anomaly scoring
//! - `health`: per-device error accounting and failure-risk classification
//! - `predictive`: analyzer facade over the health tracker
//! - `registry`: name-keyed analyzer factories built at startup

pub mod analyzer;
pub mod error;
pub mod health;
pub mod keywords;
pub mod predictive;
pub mod registry;
pub mod signal;

pub use analyzer::{Analyzer, AnalyzerReport};
pub use error::DetectionError;
pub use health::{
    DeviceHealthRecord, DeviceHealthTracker, NetworkHealthSnapshot, RiskAssessment, RiskTier,
};
pub use predictive::PredictiveAnalyzer;
pub use registry::{AnalyzerContext, AnalyzerRegistry, AnalyzerSet};
pub use signal::{AnalysisReport, Priority, SignalAnalyzer};
