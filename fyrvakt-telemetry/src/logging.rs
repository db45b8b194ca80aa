//! ## fyrvakt-telemetry::logging
//! **Structured logging with tracing and OpenTelemetry key/values**
//!
//! `EventLogger::init` installs the global subscriber once at startup.
//! `EventLogger::log_event` records node events (predictive alerts, threat
//! escalations, analyzer load failures, shutdown) inside a dedicated span so
//! they can be filtered apart from ordinary pipeline chatter.

use opentelemetry::KeyValue;
use tracing::{info_span, Instrument};
use tracing_subscriber::{fmt, EnvFilter};

/// Output format of the log stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    /// Parses the config spelling; anything but `json` is pretty.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

#[derive(Clone)]
pub struct EventLogger;

impl EventLogger {
    /// Installs the global subscriber. `RUST_LOG` wins over `default_level`.
    ///
    /// Calling it a second time is a no-op.
    pub fn init(default_level: &str, format: LogFormat) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

        let result = match format {
            LogFormat::Pretty => fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_thread_names(true)
                .try_init(),
            LogFormat::Json => fmt().with_env_filter(filter).json().try_init(),
        };

        if result.is_err() {
            tracing::debug!("global subscriber already installed");
        }
    }

    #[inline]
    pub async fn log_event(event_type: &str, metadata: Vec<KeyValue>) {
        let span = info_span!("node_event", event_type = event_type, otel.kind = "INTERNAL");

        async {
            tracing::info!(metadata = ?metadata, "Node event occurred");
        }
        .instrument(span)
        .await
    }
}
