//! Defines the Analyzer trait every pluggable analyzer implements.

use fyrvakt_core::Packet;
use serde::Serialize;

use crate::health::RiskAssessment;
use crate::signal::AnalysisReport;

/// A unit that computes a report from one valid packet.
///
/// Analyzers receive the same packet value, in configured order, and never see
/// each other's output. Cross-packet state, if any, lives in a component the
/// analyzer wraps, never in the analyzer itself.
pub trait Analyzer: Send + Sync {
    /// Registry name of the analyzer.
    fn name(&self) -> &str;

    /// Analyzes one validated packet. Cannot fail on valid input.
    fn analyze(&self, packet: &Packet) -> AnalyzerReport;
}

/// Output of an analyzer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalyzerReport {
    Signal(AnalysisReport),
    Risk(RiskAssessment),
}

impl AnalyzerReport {
    /// Packet id for signal reports, device id for risk assessments.
    pub fn correlation_id(&self) -> &str {
        match self {
            AnalyzerReport::Signal(report) => &report.packet_id,
            AnalyzerReport::Risk(assessment) => &assessment.device_id,
        }
    }
}
