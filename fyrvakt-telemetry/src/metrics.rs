//! ## fyrvakt-telemetry::metrics
//! **Prometheus counters and histograms for the aggregation loop**

use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, IntGauge, Registry, TextEncoder};

#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: Registry,
    /// Every packet pulled from the source, valid or not.
    pub packets_received: IntCounter,
    /// Packets rejected by the validator.
    pub packets_dropped: IntCounter,
    pub analyzer_latency: Histogram,
    pub high_risk_devices: IntGauge,
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRecorder {
    pub fn new() -> Self {
        let registry = Registry::new();
        let packets_received = IntCounter::new(
            "fyrvakt_packets_received_total",
            "Total packets pulled from the packet source",
        )
        .expect("static counter definition is valid");
        let packets_dropped = IntCounter::new(
            "fyrvakt_packets_dropped_total",
            "Packets discarded by the structural validator",
        )
        .expect("static counter definition is valid");
        let analyzer_latency = Histogram::with_opts(
            HistogramOpts::new(
                "fyrvakt_analyzer_latency_ns",
                "Time spent running all enabled analyzers on one packet",
            )
            .buckets(vec![1_000.0, 10_000.0, 100_000.0, 1_000_000.0]),
        )
        .expect("static histogram definition is valid");
        let high_risk_devices = IntGauge::new(
            "fyrvakt_high_risk_devices",
            "Devices currently classified as high failure risk",
        )
        .expect("static gauge definition is valid");

        for collector in [
            Box::new(packets_received.clone()) as Box<dyn prometheus::core::Collector>,
            Box::new(packets_dropped.clone()),
            Box::new(analyzer_latency.clone()),
            Box::new(high_risk_devices.clone()),
        ] {
            registry
                .register(collector)
                .expect("metric names are unique within a fresh registry");
        }

        Self {
            registry,
            packets_received,
            packets_dropped,
            analyzer_latency,
            high_risk_devices,
        }
    }

    /// Renders every registered metric in the Prometheus text format.
    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
