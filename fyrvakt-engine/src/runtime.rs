// fyrvakt-engine/src/runtime.rs

/*!
# Runtime Engine

Wires configuration, the analyzer registry, a packet source and the status
sink into an [`AggregationLoop`], so that frontends (CLI, service wrappers)
share one startup path. Also hosts the offline self-check used by `diagnose`.
*/

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use fyrvakt_config::{ConfigError, FyrvaktConfig};
use fyrvakt_core::PacketSource;
use fyrvakt_detection::{AnalyzerContext, AnalyzerRegistry, DeviceHealthTracker};
use fyrvakt_simulator::{PacketGenerator, ReplaySource};
use fyrvakt_telemetry::{EventLogger, MetricsRecorder};
use opentelemetry::KeyValue;
use tracing::{info, instrument};

use crate::engine::{
    AggregationLoop, DiagnosticsCollector, EngineError, FileStatusSink, LoopSummary,
};

/// Per-invocation overrides on top of the configuration.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Replay this capture instead of running the packet generator.
    pub replay: Option<PathBuf>,
    /// Stop after this many ticks.
    pub ticks: Option<u64>,
}

/// Runs the aggregation node until `shutdown` resolves, the source is
/// exhausted or the tick limit is hit.
#[instrument(skip_all, fields(device_id = %config.node.device_id))]
pub async fn run_node<F>(
    config: &FyrvaktConfig,
    options: RunOptions,
    metrics: MetricsRecorder,
    shutdown: F,
) -> Result<LoopSummary, EngineError>
where
    F: Future<Output = ()>,
{
    log_banner(config);

    let tracker = Arc::new(DeviceHealthTracker::with_device_limit(
        config.pipeline.max_tracked_devices,
    )?);
    let ctx = AnalyzerContext {
        tracker: tracker.clone(),
    };
    let analyzers =
        AnalyzerRegistry::with_builtin().load(&config.pipeline.enabled_analyzers, &ctx);
    for (name, e) in analyzers.failures() {
        EventLogger::log_event(
            "analyzer_load_failed",
            vec![
                KeyValue::new("analyzer", name.clone()),
                KeyValue::new("error", e.to_string()),
            ],
        )
        .await;
    }

    let source: Box<dyn PacketSource> = match &options.replay {
        Some(path) => {
            info!(path = %path.display(), "Replaying packet capture");
            Box::new(ReplaySource::open(path).await?)
        }
        None => Box::new(PacketGenerator::new(&config.simulation)),
    };
    let sink = FileStatusSink::new(&config.status.path, config.status.pretty);

    info!("--- Initialization Complete. Starting Data Aggregation ---");
    let summary = AggregationLoop::new(source, analyzers, tracker, Box::new(sink))
        .with_interval(Duration::from_millis(config.pipeline.packet_interval_ms))
        .with_tick_limit(options.ticks)
        .with_metrics(metrics)
        .run(shutdown)
        .await;

    info!(
        packets_received = summary.packets_received,
        packets_dropped = summary.packets_dropped,
        "--- Shutting down node ---"
    );
    Ok(summary)
}

fn log_banner(config: &FyrvaktConfig) {
    info!("--- {} Initializing ---", config.node.device_name);
    info!("Device ID: {}", config.node.device_id);
    info!("Log Level: {}", config.node.log_level);
    info!("Tick Interval: {} ms", config.pipeline.packet_interval_ms);
    info!(
        "Enabled Analyzers: {}",
        config.pipeline.enabled_analyzers.join(", ")
    );
}

/// Offline self-check of a node installation.
pub fn run_diagnostics(config: Result<FyrvaktConfig, ConfigError>) -> DiagnosticsCollector {
    let mut collector = DiagnosticsCollector::new();

    let config = match config {
        Ok(config) => {
            collector.record("Configuration loaded", Ok(()));
            collector.detail(format!("Device ID: {}", config.node.device_id));
            collector.detail(format!("Status file: {}", config.status.path.display()));
            config
        }
        Err(e) => {
            collector.record("Configuration loaded", Err(e.to_string()));
            return collector;
        }
    };

    let status_dir = config
        .status
        .path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    collector.record(
        format!("Status directory '{}' usable", status_dir.display()),
        std::fs::create_dir_all(status_dir)
            .map_err(|e| e.to_string())
            .and_then(|()| {
                if status_dir.is_dir() {
                    Ok(())
                } else {
                    Err("not a directory".to_string())
                }
            }),
    );

    let registry = AnalyzerRegistry::with_builtin();
    for name in &config.pipeline.enabled_analyzers {
        let outcome = if registry.contains(name) {
            Ok(())
        } else {
            Err("no analyzer registered under this name".to_string())
        };
        collector.record(format!("Analyzer '{name}' available"), outcome);
    }

    collector
}
