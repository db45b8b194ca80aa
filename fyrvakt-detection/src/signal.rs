//! ## fyrvakt-detection::signal
//! **Stateless signal-quality and anomaly scoring**
//!
//! Rules, applied to the payload text:
//! 1. `"error"` anywhere (case-sensitive) flags a threat with high priority.
//! 2. Quality starts at 100.0; more than 100 characters drops it to 85.5,
//!    fewer than 10 characters to 92.1.

use chrono::Utc;
use fyrvakt_core::Packet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analyzer::{Analyzer, AnalyzerReport};
use crate::error::DetectionError;
use crate::keywords::{KeywordMatcher, THREAT_KEYWORDS};

pub const ANALYZER_NAME: &str = "packet-analyzer";

pub const NOMINAL_QUALITY: f64 = 100.0;
pub const OVERSIZED_QUALITY: f64 = 85.5;
pub const UNDERSIZED_QUALITY: f64 = 92.1;

/// Payloads longer than this many characters are oversized.
pub const OVERSIZED_LEN: usize = 100;
/// Payloads shorter than this many characters are undersized.
pub const UNDERSIZED_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Normal,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Analysis time, milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub packet_id: String,
    pub threat_detected: bool,
    pub signal_quality: f64,
    pub priority: Priority,
}

#[derive(Debug, Clone)]
pub struct SignalAnalyzer {
    threat_keywords: KeywordMatcher,
}

impl SignalAnalyzer {
    pub fn new() -> Result<Self, DetectionError> {
        Ok(Self {
            threat_keywords: KeywordMatcher::new(THREAT_KEYWORDS)?,
        })
    }

    pub fn score(&self, packet: &Packet) -> AnalysisReport {
        let text = packet.payload_text();
        let threat_detected = self.threat_keywords.is_match(&text);

        let report = AnalysisReport {
            timestamp: Utc::now().timestamp_millis(),
            packet_id: packet.id.clone(),
            threat_detected,
            signal_quality: signal_quality(text.chars().count()),
            priority: if threat_detected {
                Priority::High
            } else {
                Priority::Normal
            },
        };

        if threat_detected {
            debug!(packet_id = %packet.id, "anomaly detected in payload");
        }
        report
    }
}

/// Quality score for a payload of `len` characters.
pub fn signal_quality(len: usize) -> f64 {
    if len > OVERSIZED_LEN {
        OVERSIZED_QUALITY
    } else if len < UNDERSIZED_LEN {
        UNDERSIZED_QUALITY
    } else {
        NOMINAL_QUALITY
    }
}

impl Analyzer for SignalAnalyzer {
    fn name(&self) -> &str {
        ANALYZER_NAME
    }

    fn analyze(&self, packet: &Packet) -> AnalyzerReport {
        AnalyzerReport::Signal(self.score(packet))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn packet(payload: &str) -> Packet {
        Packet::new("pkt-1", "RPI3-NODE-001", 1, payload)
    }

    #[test]
    fn flags_error_payloads() {
        let analyzer = SignalAnalyzer::new().unwrap();
        let report = analyzer.score(&packet("critical system error detected"));
        assert!(report.threat_detected);
        assert_eq!(report.priority, Priority::High);
        assert_eq!(report.packet_id, "pkt-1");
    }

    #[test]
    fn ignores_other_casings() {
        let analyzer = SignalAnalyzer::new().unwrap();
        let report = analyzer.score(&packet("critical system ERROR"));
        assert!(!report.threat_detected);
        assert_eq!(report.priority, Priority::Normal);
    }

    #[test]
    fn quality_boundaries() {
        assert_eq!(signal_quality(0), UNDERSIZED_QUALITY);
        assert_eq!(signal_quality(9), UNDERSIZED_QUALITY);
        assert_eq!(signal_quality(10), NOMINAL_QUALITY);
        assert_eq!(signal_quality(100), NOMINAL_QUALITY);
        assert_eq!(signal_quality(101), OVERSIZED_QUALITY);
    }

    #[test]
    fn empty_payload_is_undersized() {
        let analyzer = SignalAnalyzer::new().unwrap();
        let report = analyzer.score(&packet(""));
        assert_eq!(report.signal_quality, UNDERSIZED_QUALITY);
        assert!(!report.threat_detected);
    }

    #[test]
    fn report_serializes_in_camel_case() {
        let analyzer = SignalAnalyzer::new().unwrap();
        let value = serde_json::to_value(analyzer.score(&packet("data chunk 1"))).unwrap();
        assert_eq!(value["packetId"], "pkt-1");
        assert_eq!(value["threatDetected"], false);
        assert_eq!(value["signalQuality"], 100.0);
        assert_eq!(value["priority"], "normal");
    }

    #[test]
    fn analyzer_report_correlates_by_packet_id() {
        let analyzer = SignalAnalyzer::new().unwrap();
        let report = analyzer.analyze(&packet("ok"));
        assert_eq!(report.correlation_id(), "pkt-1");
        assert_eq!(analyzer.name(), ANALYZER_NAME);
    }

    proptest! {
        #[test]
        fn threat_iff_payload_contains_error(payload in "[a-z ]{0,40}") {
            let analyzer = SignalAnalyzer::new().unwrap();
            let report = analyzer.score(&packet(&payload));
            let expected = payload.contains("error");
            prop_assert_eq!(report.threat_detected, expected);
            prop_assert_eq!(
                report.priority,
                if expected { Priority::High } else { Priority::Normal }
            );
        }

        #[test]
        fn quality_follows_length(payload in "[a-zA-Z0-9 ]{0,150}") {
            let analyzer = SignalAnalyzer::new().unwrap();
            let report = analyzer.score(&packet(&payload));
            let len = payload.chars().count();
            let expected = if len > 100 { 85.5 } else if len < 10 { 92.1 } else { 100.0 };
            prop_assert_eq!(report.signal_quality, expected);
        }

        #[test]
        fn embedded_error_always_flags(prefix in "[a-z ]{0,20}", suffix in "[a-z ]{0,20}") {
            let analyzer = SignalAnalyzer::new().unwrap();
            let payload = format!("{prefix}error{suffix}");
            prop_assert!(analyzer.score(&packet(&payload)).threat_detected);
        }
    }
}
