//! Operator-facing logging of analyzer output.

use fyrvakt_detection::{AnalysisReport, AnalyzerReport, RiskAssessment, RiskTier};
use fyrvakt_telemetry::EventLogger;
use opentelemetry::KeyValue;
use tracing::{debug, error, warn};

pub(crate) async fn report(report: &AnalyzerReport) {
    match report {
        AnalyzerReport::Signal(analysis) => signal(analysis).await,
        AnalyzerReport::Risk(assessment) => risk(assessment).await,
    }
}

async fn signal(analysis: &AnalysisReport) {
    debug!(
        packet_id = %analysis.packet_id,
        "Quality={:.1}%, Priority={:?}",
        analysis.signal_quality,
        analysis.priority
    );
    if !analysis.threat_detected {
        return;
    }
    error!(
        packet_id = %analysis.packet_id,
        "Threat detected in packet, escalating"
    );
    EventLogger::log_event(
        "threat_detected",
        vec![
            KeyValue::new("packet_id", analysis.packet_id.clone()),
            KeyValue::new("signal_quality", analysis.signal_quality),
        ],
    )
    .await;
}

async fn risk(assessment: &RiskAssessment) {
    let tier = assessment.failure_risk;
    if !tier.is_alerting() {
        debug!(device_id = %assessment.device_id, risk = %tier, "Predictive check");
        return;
    }
    if tier == RiskTier::High {
        error!(
            device_id = %assessment.device_id,
            risk = %tier,
            "[Predictive Alert] Recommendation: {}",
            assessment.recommendation
        );
    } else {
        warn!(
            device_id = %assessment.device_id,
            risk = %tier,
            "[Predictive Alert] Recommendation: {}",
            assessment.recommendation
        );
    }
    EventLogger::log_event(
        "predictive_alert",
        vec![
            KeyValue::new("device_id", assessment.device_id.clone()),
            KeyValue::new("failure_risk", tier.as_str()),
            KeyValue::new("error_count", assessment.error_count as i64),
        ],
    )
    .await;
}
