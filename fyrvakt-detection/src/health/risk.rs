//! Risk classification of accumulated device errors.

use std::fmt;

use chrono::Local;
use serde::{Deserialize, Serialize};

use super::DeviceHealthRecord;

/// Error count at which a device becomes high risk.
pub const ERROR_THRESHOLD: u64 = 3;
/// Error count at which a device becomes medium risk.
pub const WARNING_THRESHOLD: u64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Maps an accumulated error count to a tier.
    pub fn classify(error_count: u64) -> Self {
        if error_count >= ERROR_THRESHOLD {
            RiskTier::High
        } else if error_count >= WARNING_THRESHOLD {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            RiskTier::Low => "Monitor",
            RiskTier::Medium => "Schedule maintenance",
            RiskTier::High => "Immediate inspection required",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        }
    }

    /// Medium and high tiers are worth an operator's attention.
    pub fn is_alerting(self) -> bool {
        self >= RiskTier::Medium
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure-risk view of one device. Derived from a record, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub device_id: String,
    pub failure_risk: RiskTier,
    pub recommendation: String,
    pub error_count: u64,
    /// Local wall-clock time of the last packet, `HH:MM:SS`.
    pub last_seen: String,
}

impl RiskAssessment {
    pub fn from_record(record: &DeviceHealthRecord) -> Self {
        let failure_risk = RiskTier::classify(record.error_count);
        Self {
            device_id: record.device_id.clone(),
            failure_risk,
            recommendation: failure_risk.recommendation().to_owned(),
            error_count: record.error_count,
            last_seen: record
                .last_seen
                .with_timezone(&Local)
                .format("%H:%M:%S")
                .to_string(),
        }
    }
}
