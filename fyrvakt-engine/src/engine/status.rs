//! Exported network status.
//!
//! The aggregation loop renders one [`StatusReport`] per completed tick and
//! hands it to a [`StatusSink`]. The default sink keeps a JSON file up to date
//! for the dashboard; the file is transient and removed on shutdown.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use fyrvakt_detection::NetworkHealthSnapshot;
use serde::Serialize;

use super::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SystemStatus {
    Nominal,
    #[serde(rename = "High-Risk Devices Detected")]
    HighRiskDevicesDetected,
}

impl SystemStatus {
    pub fn of(snapshot: &NetworkHealthSnapshot) -> Self {
        if snapshot.has_high_risk() {
            SystemStatus::HighRiskDevicesDetected
        } else {
            SystemStatus::Nominal
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    /// RFC 3339, UTC, millisecond precision.
    pub timestamp: String,
    pub active_devices: NetworkHealthSnapshot,
    /// Every packet pulled from the source so far, including dropped ones.
    pub total_packets_processed: u64,
    pub system_status: SystemStatus,
}

impl StatusReport {
    pub fn new(snapshot: NetworkHealthSnapshot, total_packets_processed: u64) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            system_status: SystemStatus::of(&snapshot),
            active_devices: snapshot,
            total_packets_processed,
        }
    }
}

/// Destination of published status reports.
#[async_trait]
pub trait StatusSink: Send {
    async fn publish(&mut self, report: &StatusReport) -> Result<(), EngineError>;

    /// Called once when the loop terminates.
    async fn cleanup(&mut self) -> Result<(), EngineError>;
}

/// Writes each report to a JSON file, replacing it atomically.
#[derive(Debug, Clone)]
pub struct FileStatusSink {
    path: PathBuf,
    pretty: bool,
}

impl FileStatusSink {
    pub fn new(path: impl Into<PathBuf>, pretty: bool) -> Self {
        Self {
            path: path.into(),
            pretty,
        }
    }

    fn io_error(&self, source: std::io::Error) -> EngineError {
        EngineError::Status {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl StatusSink for FileStatusSink {
    async fn publish(&mut self, report: &StatusReport) -> Result<(), EngineError> {
        let body = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }
        let staging = self.path.with_extension("json.tmp");
        tokio::fs::write(&staging, body)
            .await
            .map_err(|e| self.io_error(e))?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(|e| self.io_error(e))
    }

    async fn cleanup(&mut self) -> Result<(), EngineError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

/// Reads a status file written by a running node. `Ok(None)` when absent.
pub async fn read_status_file(
    path: impl AsRef<Path>,
) -> Result<Option<serde_json::Value>, EngineError> {
    let path = path.as_ref();
    match tokio::fs::read_to_string(path).await {
        Ok(body) => Ok(Some(serde_json::from_str(&body)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(EngineError::Status {
            path: path.to_path_buf(),
            source,
        }),
    }
}
