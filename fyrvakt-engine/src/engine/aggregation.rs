//! Aggregation loop - pulls one packet per tick, runs the analyzer pipeline
//! and publishes the resulting network status.
//!
//! Ticks never overlap: the tick body is awaited inside the `select!` arm, and
//! the shutdown future is only polled between ticks. Whatever ends the loop,
//! the status sink is cleaned up exactly once before `run` returns.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use fyrvakt_core::{Packet, PacketSource};
use fyrvakt_detection::{AnalyzerSet, DeviceHealthTracker};
use fyrvakt_telemetry::{EventLogger, MetricsRecorder};
use opentelemetry::KeyValue;
use tokio::sync::watch;
use tokio::time::{interval_at, MissedTickBehavior};
use tracing::{error, info, instrument, warn};

use super::alerts;
use super::status::{StatusReport, StatusSink};

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Shutdown,
    SourceExhausted,
    TickLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSummary {
    pub ticks: u64,
    pub packets_received: u64,
    pub packets_dropped: u64,
    pub stop: StopReason,
}

pub struct AggregationLoop {
    source: Box<dyn PacketSource>,
    analyzers: AnalyzerSet,
    tracker: Arc<DeviceHealthTracker>,
    sink: Box<dyn StatusSink>,
    metrics: MetricsRecorder,
    tick_interval: Duration,
    tick_limit: Option<u64>,
    packets_received: u64,
    packets_dropped: u64,
    status_tx: watch::Sender<Option<StatusReport>>,
}

impl AggregationLoop {
    pub fn new(
        source: Box<dyn PacketSource>,
        analyzers: AnalyzerSet,
        tracker: Arc<DeviceHealthTracker>,
        sink: Box<dyn StatusSink>,
    ) -> Self {
        let (status_tx, _) = watch::channel(None);
        Self {
            source,
            analyzers,
            tracker,
            sink,
            metrics: MetricsRecorder::new(),
            tick_interval: DEFAULT_TICK_INTERVAL,
            tick_limit: None,
            packets_received: 0,
            packets_dropped: 0,
            status_tx,
        }
    }

    pub fn with_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    /// Stops after `limit` ticks. `None` runs until shutdown or exhaustion.
    pub fn with_tick_limit(mut self, limit: Option<u64>) -> Self {
        self.tick_limit = limit;
        self
    }

    pub fn with_metrics(mut self, metrics: MetricsRecorder) -> Self {
        self.metrics = metrics;
        self
    }

    /// Latest published status. Holds `None` until the first whole tick.
    pub fn subscribe(&self) -> watch::Receiver<Option<StatusReport>> {
        self.status_tx.subscribe()
    }

    #[instrument(skip_all, name = "aggregation_loop")]
    pub async fn run<F>(mut self, shutdown: F) -> LoopSummary
    where
        F: Future<Output = ()>,
    {
        info!("Starting data aggregation");
        let mut ticker = interval_at(
            tokio::time::Instant::now() + self.tick_interval,
            self.tick_interval,
        );
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        let mut ticks = 0u64;
        let stop = loop {
            if self.tick_limit.is_some_and(|limit| ticks >= limit) {
                break StopReason::TickLimit;
            }
            tokio::select! {
                biased;
                _ = &mut shutdown => break StopReason::Shutdown,
                _ = ticker.tick() => {
                    ticks += 1;
                    if !self.tick().await {
                        break StopReason::SourceExhausted;
                    }
                }
            }
        };

        let summary = LoopSummary {
            ticks,
            packets_received: self.packets_received,
            packets_dropped: self.packets_dropped,
            stop,
        };
        self.cleanup(&summary).await;
        summary
    }

    /// One tick. Returns `false` once the source is exhausted.
    async fn tick(&mut self) -> bool {
        let Some(raw) = self.source.next_packet().await else {
            info!("Packet source exhausted");
            return false;
        };
        self.packets_received += 1;
        self.metrics.packets_received.inc();
        let packet_id = raw.display_id().into_owned();
        info!(
            "Received packet {} from {}",
            packet_id,
            raw.display_source()
        );

        let packet = match Packet::try_from(raw) {
            Ok(packet) => packet,
            Err(e) => {
                warn!(packet_id = %packet_id, error = %e, "Invalid packet structure, discarding");
                self.packets_dropped += 1;
                self.metrics.packets_dropped.inc();
                return true;
            }
        };

        let started = Instant::now();
        let reports = self.analyzers.analyze(&packet);
        self.metrics
            .analyzer_latency
            .observe(started.elapsed().as_nanos() as f64);

        for report in &reports {
            alerts::report(report).await;
        }
        info!(
            packet_id = %packet.id,
            source = %packet.source,
            "Packet processed and forwarded"
        );

        self.publish().await;
        true
    }

    async fn publish(&mut self) {
        let snapshot = self.tracker.snapshot();
        self.metrics
            .high_risk_devices
            .set(snapshot.high_risk_count() as i64);

        let report = StatusReport::new(snapshot, self.packets_received);
        if let Err(e) = self.sink.publish(&report).await {
            error!(error = %e, "Failed to write status");
        }
        self.status_tx.send_replace(Some(report));
    }

    async fn cleanup(&mut self, summary: &LoopSummary) {
        info!(stop = ?summary.stop, ticks = summary.ticks, "Shutting down aggregation");
        if let Err(e) = self.sink.cleanup().await {
            error!(error = %e, "Failed to remove status");
        }
        EventLogger::log_event(
            "node_shutdown",
            vec![
                KeyValue::new("ticks", summary.ticks as i64),
                KeyValue::new("packets_received", summary.packets_received as i64),
                KeyValue::new("packets_dropped", summary.packets_dropped as i64),
            ],
        )
        .await;
    }
}
