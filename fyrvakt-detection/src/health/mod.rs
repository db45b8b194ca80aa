//! ## fyrvakt-detection::health
//! **Per-device error accounting and failure-risk snapshots**
//!
//! The tracker exclusively owns the device table. `observe` is a
//! read-modify-write under the write lock; `snapshot` copies the table out
//! under the read lock, so readers never see a half-applied update.
//!
//! Records live as long as the tracker. With a device bound configured, the
//! least recently seen device is evicted when a new one would exceed it, and
//! its error count is forgotten: a device reporting again after eviction
//! starts over at zero.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use fyrvakt_core::Packet;
use parking_lot::RwLock;
use serde::Serialize;
use tracing::debug;

use crate::error::DetectionError;
use crate::keywords::{KeywordMatcher, FAULT_KEYWORDS};

mod risk;

pub use risk::{RiskAssessment, RiskTier, ERROR_THRESHOLD, WARNING_THRESHOLD};

/// Accumulated health state of one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceHealthRecord {
    pub device_id: String,
    /// Packets that reported a fault. Never decreases.
    pub error_count: u64,
    pub last_seen: DateTime<Utc>,
}

/// Point-in-time risk view of every tracked device, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NetworkHealthSnapshot {
    pub devices: Vec<RiskAssessment>,
}

impl NetworkHealthSnapshot {
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RiskAssessment> {
        self.devices.iter()
    }

    pub fn get(&self, device_id: &str) -> Option<&RiskAssessment> {
        self.devices.iter().find(|a| a.device_id == device_id)
    }

    pub fn high_risk_count(&self) -> usize {
        self.devices
            .iter()
            .filter(|a| a.failure_risk == RiskTier::High)
            .count()
    }

    pub fn has_high_risk(&self) -> bool {
        self.high_risk_count() > 0
    }
}

#[derive(Debug, Default)]
struct HealthTable {
    /// Insertion ordered.
    records: Vec<DeviceHealthRecord>,
    index: HashMap<String, usize>,
}

impl HealthTable {
    fn slot_for(&mut self, device_id: &str, now: DateTime<Utc>, bound: Option<usize>) -> usize {
        if let Some(&slot) = self.index.get(device_id) {
            return slot;
        }
        if let Some(bound) = bound {
            while self.records.len() >= bound {
                self.evict_least_recent();
            }
        }
        self.records.push(DeviceHealthRecord {
            device_id: device_id.to_owned(),
            error_count: 0,
            last_seen: now,
        });
        let slot = self.records.len() - 1;
        self.index.insert(device_id.to_owned(), slot);
        slot
    }

    fn evict_least_recent(&mut self) {
        let Some((slot, _)) = self
            .records
            .iter()
            .enumerate()
            .min_by_key(|(_, record)| record.last_seen)
        else {
            return;
        };
        let evicted = self.records.remove(slot);
        self.index.remove(&evicted.device_id);
        for other in self.index.values_mut() {
            if *other > slot {
                *other -= 1;
            }
        }
        debug!(device_id = %evicted.device_id, "evicted least recently seen device");
    }
}

#[derive(Debug)]
pub struct DeviceHealthTracker {
    table: RwLock<HealthTable>,
    fault_keywords: KeywordMatcher,
    max_devices: Option<usize>,
}

impl DeviceHealthTracker {
    /// Tracker without a bound on the number of devices.
    pub fn new() -> Result<Self, DetectionError> {
        Self::with_device_limit(None)
    }

    /// Tracker evicting the least recently seen device beyond `max_devices`.
    /// `Some(0)` is treated as `Some(1)`.
    pub fn with_device_limit(max_devices: Option<usize>) -> Result<Self, DetectionError> {
        Ok(Self {
            table: RwLock::new(HealthTable::default()),
            fault_keywords: KeywordMatcher::new(FAULT_KEYWORDS)?,
            max_devices: max_devices.map(|n| n.max(1)),
        })
    }

    /// Records one packet from `packet.source` and returns its fresh assessment.
    pub fn observe(&self, packet: &Packet) -> RiskAssessment {
        self.observe_at(packet, Utc::now())
    }

    /// [`observe`](Self::observe) with an explicit clock reading.
    pub fn observe_at(&self, packet: &Packet, now: DateTime<Utc>) -> RiskAssessment {
        let is_fault = self.fault_keywords.is_match(&packet.payload_text());

        let mut table = self.table.write();
        let slot = table.slot_for(&packet.source, now, self.max_devices);
        let record = &mut table.records[slot];
        record.last_seen = now;
        if is_fault {
            record.error_count = record.error_count.saturating_add(1);
            debug!(
                device_id = %record.device_id,
                error_count = record.error_count,
                "fault reported by device"
            );
        }
        RiskAssessment::from_record(record)
    }

    /// Consistent copy of every device's assessment, in first-seen order.
    /// Tiers are re-derived from the records on every call.
    pub fn snapshot(&self) -> NetworkHealthSnapshot {
        let table = self.table.read();
        NetworkHealthSnapshot {
            devices: table.records.iter().map(RiskAssessment::from_record).collect(),
        }
    }

    /// Copy of a single record.
    pub fn record(&self, device_id: &str) -> Option<DeviceHealthRecord> {
        let table = self.table.read();
        table
            .index
            .get(device_id)
            .map(|&slot| table.records[slot].clone())
    }

    pub fn len(&self) -> usize {
        self.table.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;
    use std::sync::Arc;

    fn packet(source: &str, payload: &str) -> Packet {
        Packet::new("pkt", source, 0, payload)
    }

    #[test]
    fn lazily_creates_records() {
        let tracker = DeviceHealthTracker::new().unwrap();
        assert!(tracker.is_empty());

        let assessment = tracker.observe(&packet("D1", "data chunk 1"));
        assert_eq!(assessment.device_id, "D1");
        assert_eq!(assessment.failure_risk, RiskTier::Low);
        assert_eq!(assessment.recommendation, "Monitor");
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn timeout_threshold_scenario() {
        let tracker = DeviceHealthTracker::new().unwrap();

        let first = tracker.observe(&packet("ESP8266-NODE-007", "critical sensor timeout"));
        assert_eq!(first.error_count, 1);
        assert_eq!(first.failure_risk, RiskTier::Medium);

        tracker.observe(&packet("ESP8266-NODE-007", "critical sensor timeout"));
        let third = tracker.observe(&packet("ESP8266-NODE-007", "critical sensor timeout"));
        assert_eq!(third.error_count, 3);
        assert_eq!(third.failure_risk, RiskTier::High);
        assert_eq!(third.recommendation, "Immediate inspection required");
    }

    #[test]
    fn at_most_one_error_per_packet() {
        let tracker = DeviceHealthTracker::new().unwrap();
        let assessment = tracker.observe(&packet("D1", "error: fail after timeout, error again"));
        assert_eq!(assessment.error_count, 1);
    }

    #[test]
    fn keyword_matching_is_case_sensitive() {
        let tracker = DeviceHealthTracker::new().unwrap();
        let assessment = tracker.observe(&packet("D1", "FAIL TIMEOUT Error"));
        assert_eq!(assessment.error_count, 0);
    }

    #[test]
    fn end_to_end_two_packets() {
        let tracker = DeviceHealthTracker::new().unwrap();
        tracker.observe(&Packet::new("p1", "D1", 1, "ok"));
        tracker.observe(&Packet::new("p2", "D1", 2, "fail now"));

        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.len(), 1);
        let d1 = snapshot.get("D1").unwrap();
        assert_eq!(d1.error_count, 1);
        assert_eq!(d1.failure_risk, RiskTier::Medium);
    }

    #[test]
    fn snapshot_keeps_first_seen_order() {
        let tracker = DeviceHealthTracker::new().unwrap();
        for source in ["C", "A", "B", "A", "C"] {
            tracker.observe(&packet(source, "ok"));
        }
        let order: Vec<_> = tracker
            .snapshot()
            .iter()
            .map(|a| a.device_id.clone())
            .collect();
        assert_eq!(order, vec!["C", "A", "B"]);
    }

    #[test]
    fn snapshot_is_idempotent() {
        let tracker = DeviceHealthTracker::new().unwrap();
        tracker.observe(&packet("D1", "error"));
        tracker.observe(&packet("D2", "ok"));
        assert_eq!(tracker.snapshot(), tracker.snapshot());
    }

    #[test]
    fn updates_last_seen() {
        let tracker = DeviceHealthTracker::new().unwrap();
        let t0 = Utc::now();
        let t1 = t0 + Duration::seconds(5);
        tracker.observe_at(&packet("D1", "ok"), t0);
        tracker.observe_at(&packet("D1", "ok"), t1);
        assert_eq!(tracker.record("D1").unwrap().last_seen, t1);
    }

    #[test]
    fn evicts_least_recently_seen_beyond_limit() {
        let tracker = DeviceHealthTracker::with_device_limit(Some(2)).unwrap();
        let t0 = Utc::now();
        tracker.observe_at(&packet("D1", "error"), t0);
        tracker.observe_at(&packet("D2", "ok"), t0 + Duration::seconds(1));
        tracker.observe_at(&packet("D1", "ok"), t0 + Duration::seconds(2));
        tracker.observe_at(&packet("D3", "ok"), t0 + Duration::seconds(3));

        assert_eq!(tracker.len(), 2);
        assert!(tracker.record("D2").is_none());
        assert_eq!(tracker.record("D1").unwrap().error_count, 1);

        let order: Vec<_> = tracker
            .snapshot()
            .iter()
            .map(|a| a.device_id.clone())
            .collect();
        assert_eq!(order, vec!["D1", "D3"]);

        tracker.observe_at(&packet("D3", "fail"), t0 + Duration::seconds(4));
        assert_eq!(tracker.record("D3").unwrap().error_count, 1);
    }

    #[test]
    fn evicted_device_starts_over() {
        let tracker = DeviceHealthTracker::with_device_limit(Some(1)).unwrap();
        let t0 = Utc::now();
        tracker.observe_at(&packet("D1", "fail"), t0);
        tracker.observe_at(&packet("D2", "ok"), t0 + Duration::seconds(1));
        assert!(tracker.record("D1").is_none());

        let back = tracker.observe_at(&packet("D1", "ok"), t0 + Duration::seconds(2));
        assert_eq!(back.error_count, 0);
        assert_eq!(back.failure_risk, RiskTier::Low);
    }

    #[test]
    fn snapshot_while_observing_is_consistent() {
        let tracker = Arc::new(DeviceHealthTracker::new().unwrap());
        let writer = {
            let tracker = tracker.clone();
            std::thread::spawn(move || {
                for i in 0..500 {
                    tracker.observe(&packet(&format!("D{}", i % 5), "timeout"));
                }
            })
        };

        let mut previous: HashMap<String, u64> = HashMap::new();
        for _ in 0..200 {
            let snapshot = tracker.snapshot();
            for assessment in snapshot.iter() {
                assert_eq!(
                    assessment.failure_risk,
                    RiskTier::classify(assessment.error_count)
                );
                let before = previous
                    .insert(assessment.device_id.clone(), assessment.error_count)
                    .unwrap_or(0);
                assert!(assessment.error_count >= before);
            }
        }
        writer.join().unwrap();
        assert!(tracker.snapshot().iter().all(|a| a.error_count == 100));
    }

    proptest! {
        #[test]
        fn error_count_never_decreases(
            payloads in proptest::collection::vec(
                prop_oneof![
                    Just("ok"),
                    Just("fail now"),
                    Just("timeout"),
                    Just("error"),
                    Just("data chunk 9"),
                ],
                1..50,
            )
        ) {
            let tracker = DeviceHealthTracker::new().unwrap();
            let mut last = 0;
            for payload in &payloads {
                let assessment = tracker.observe(&packet("D1", payload));
                prop_assert!(assessment.error_count >= last);
                prop_assert!(assessment.error_count <= last + 1);
                last = assessment.error_count;
            }
            let expected = payloads.iter().filter(|p| **p != "ok" && !p.starts_with("data")).count();
            prop_assert_eq!(last, expected as u64);
        }
    }
}
