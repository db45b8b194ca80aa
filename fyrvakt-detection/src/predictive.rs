//! Predictive-maintenance analyzer.
//!
//! Holds no state of its own: every packet is forwarded to the shared
//! [`DeviceHealthTracker`], which the aggregation loop also reads snapshots from.

use std::sync::Arc;

use fyrvakt_core::Packet;

use crate::analyzer::{Analyzer, AnalyzerReport};
use crate::health::{DeviceHealthTracker, RiskAssessment};

pub const ANALYZER_NAME: &str = "predictive-maintenance";

#[derive(Debug, Clone)]
pub struct PredictiveAnalyzer {
    tracker: Arc<DeviceHealthTracker>,
}

impl PredictiveAnalyzer {
    pub fn new(tracker: Arc<DeviceHealthTracker>) -> Self {
        Self { tracker }
    }

    pub fn assess(&self, packet: &Packet) -> RiskAssessment {
        self.tracker.observe(packet)
    }
}

impl Analyzer for PredictiveAnalyzer {
    fn name(&self) -> &str {
        ANALYZER_NAME
    }

    fn analyze(&self, packet: &Packet) -> AnalyzerReport {
        AnalyzerReport::Risk(self.assess(packet))
    }
}
