pub mod engine;
pub mod runtime;

// Re-export the runtime entry points so frontends can simply do:
pub use engine::{
    read_status_file, AggregationLoop, DiagnosticsCollector, EngineError, FileStatusSink,
    LoopSummary, StatusReport, StatusSink, StopReason, SystemStatus,
};
pub use runtime::{run_diagnostics, run_node, RunOptions};
