//! Replay module.
//!
//! Plays back a recorded capture, one JSON packet per line, in file order.
//! Blank lines are skipped. A line that is not a JSON object is replayed as an
//! empty packet so that it reaches the validator and gets dropped there.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fyrvakt_core::{PacketSource, RawPacket};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tracing::{error, warn};

use crate::error::SimulatorError;

pub struct ReplaySource {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
    line_no: usize,
}

impl ReplaySource {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SimulatorError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)
            .await
            .map_err(|source| SimulatorError::ReplayOpen {
                path: path.clone(),
                source,
            })?;
        Ok(Self {
            path,
            lines: BufReader::new(file).lines(),
            line_no: 0,
        })
    }
}

/// Parses one capture line.
pub fn parse_line(line: &str) -> Result<RawPacket, serde_json::Error> {
    serde_json::from_str(line)
}

#[async_trait]
impl PacketSource for ReplaySource {
    async fn next_packet(&mut self) -> Option<RawPacket> {
        loop {
            let line = match self.lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => return None,
                Err(e) => {
                    error!(path = %self.path.display(), error = %e, "replay read failed");
                    return None;
                }
            };
            self.line_no += 1;
            if line.trim().is_empty() {
                continue;
            }
            return Some(parse_line(&line).unwrap_or_else(|e| {
                warn!(line = self.line_no, error = %e, "unparseable replay line");
                RawPacket::default()
            }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fyrvakt_core::validate;
    use std::io::Write;

    #[tokio::test]
    async fn replays_lines_in_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"id":"p1","source":"D1","timestamp":1,"payload":"ok"}}"#
        )
        .unwrap();
        writeln!(file).unwrap();
        writeln!(file, "not json").unwrap();
        writeln!(file, r#"{{"id":"p3","source":"D1","timestamp":3}}"#).unwrap();
        writeln!(
            file,
            r#"{{"id":"p4","source":"D1","timestamp":4,"payload":"fail now"}}"#
        )
        .unwrap();

        let mut replay = ReplaySource::open(file.path()).await.unwrap();

        let first = replay.next_packet().await.unwrap();
        assert_eq!(first.display_id(), "p1");
        assert!(validate(&first));

        let garbage = replay.next_packet().await.unwrap();
        assert_eq!(garbage, RawPacket::default());
        assert!(!validate(&garbage));

        let no_payload = replay.next_packet().await.unwrap();
        assert!(!validate(&no_payload));

        assert!(validate(&replay.next_packet().await.unwrap()));
        assert!(replay.next_packet().await.is_none());
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ReplaySource::open(dir.path().join("absent.ndjson"))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, SimulatorError::ReplayOpen { .. }));
    }

    #[test]
    fn scalars_and_truncated_lines_are_not_packets() {
        assert!(parse_line("42").is_err());
        assert!(parse_line(r#"{"id":"p1","#).is_err());
    }
}
