#[macro_use]
extern crate criterion;

use std::sync::Arc;

use criterion::{black_box, Criterion};

use fyrvakt_core::Packet;
use fyrvakt_detection::{AnalyzerContext, AnalyzerRegistry, DeviceHealthTracker, SignalAnalyzer};

const SOURCES: [&str; 4] = [
    "ESP8266-NODE-007",
    "ESP8266-NODE-015",
    "NODEMCU-RPT-004",
    "RPI3-NODE-001",
];

fn packets(n: usize) -> Vec<Packet> {
    (0..n)
        .map(|i| {
            let payload = if i % 5 < 2 {
                "critical sensor timeout".to_string()
            } else {
                format!("data chunk {i}")
            };
            Packet::new(format!("pkt-{i}"), SOURCES[i % SOURCES.len()], i as i64, payload)
        })
        .collect()
}

fn benchmark_signal_scoring(c: &mut Criterion) {
    let analyzer = SignalAnalyzer::new().unwrap();
    let batch = packets(256);

    c.bench_function("signal_scoring", |b| {
        b.iter(|| {
            for packet in &batch {
                black_box(analyzer.score(packet));
            }
        })
    });
}

fn benchmark_health_observe(c: &mut Criterion) {
    let tracker = DeviceHealthTracker::new().unwrap();
    let batch = packets(256);

    c.bench_function("health_observe", |b| {
        b.iter(|| {
            for packet in &batch {
                black_box(tracker.observe(packet));
            }
        })
    });
}

fn benchmark_full_pipeline(c: &mut Criterion) {
    let ctx = AnalyzerContext {
        tracker: Arc::new(DeviceHealthTracker::new().unwrap()),
    };
    let set = AnalyzerRegistry::with_builtin()
        .load(&["packet-analyzer", "predictive-maintenance"], &ctx);
    let batch = packets(256);

    c.bench_function("analyzer_pipeline", |b| {
        b.iter(|| {
            for packet in &batch {
                black_box(set.analyze(packet));
            }
            black_box(ctx.tracker.snapshot());
        })
    });
}

criterion_group!(
    benches,
    benchmark_signal_scoring,
    benchmark_health_observe,
    benchmark_full_pipeline
);
criterion_main!(benches);
