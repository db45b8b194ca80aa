//! Mock edge fleet.
//!
//! Packet `n` (counting from 1) comes from `sources[n % sources.len()]`. The
//! anomaly source reports the anomaly payload whenever `n % 5 < 2`; every
//! other packet carries `data chunk <n>`.

use async_trait::async_trait;
use chrono::Utc;
use fyrvakt_config::SimulatorConfig;
use fyrvakt_core::{PacketSource, RawPacket};
use tracing::debug;

use crate::chaos::ChaosInjector;

#[derive(Debug, Clone)]
pub struct PacketGenerator {
    sources: Vec<String>,
    anomaly_source: Option<String>,
    anomaly_payload: String,
    counter: u64,
    chaos: ChaosInjector,
}

impl PacketGenerator {
    pub fn new(config: &SimulatorConfig) -> Self {
        Self {
            sources: config.sources.clone(),
            anomaly_source: config.anomaly_source.clone(),
            anomaly_payload: config.anomaly_payload.clone(),
            counter: 0,
            chaos: ChaosInjector::new(config.seed, config.fault_probability),
        }
    }

    /// Packets generated so far.
    pub fn generated(&self) -> u64 {
        self.counter
    }

    /// Produces the next packet, or `None` when no sources are configured.
    pub fn generate(&mut self) -> Option<RawPacket> {
        if self.sources.is_empty() {
            return None;
        }
        self.counter += 1;
        let n = self.counter;
        let source = &self.sources[(n % self.sources.len() as u64) as usize];

        let is_anomaly = self.anomaly_source.as_deref() == Some(source.as_str()) && n % 5 < 2;
        let payload = if is_anomaly {
            self.anomaly_payload.clone()
        } else {
            format!("data chunk {n}")
        };

        let now = Utc::now().timestamp_millis();
        let mut packet = RawPacket::new(format!("pkt-{now}-{n}"), source.as_str(), now, payload);
        if let Some(field) = self.chaos.inject(&mut packet) {
            debug!(packet = n, field, "chaos stripped packet field");
        }
        Some(packet)
    }
}

#[async_trait]
impl PacketSource for PacketGenerator {
    async fn next_packet(&mut self) -> Option<RawPacket> {
        self.generate()
    }
}
