mod aggregation;
mod alerts;
mod diagnostics;
mod error;
mod status;

pub use self::{
    aggregation::{AggregationLoop, LoopSummary, StopReason, DEFAULT_TICK_INTERVAL},
    diagnostics::{DiagnosticCheck, DiagnosticsCollector},
    error::EngineError,
    status::{read_status_file, FileStatusSink, StatusReport, StatusSink, SystemStatus},
};
