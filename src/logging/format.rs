//! Log setup plus ndjson alert events (one JSON object per line) for downstream ingestion.

use crate::results::SessionResult;
use serde::Serialize;
use std::io::Write;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
pub struct AlertEvent<'a> {
    pub ts: String,
    pub batch_id: &'a str,
    pub session_id: &'a str,
    pub attack_detected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'a str>,
}

impl<'a> AlertEvent<'a> {
    /// Reason is only attached to detections
    pub fn from_result(batch_id: &'a str, ts: String, result: &'a SessionResult) -> Self {
        Self {
            ts,
            batch_id,
            session_id: &result.session_id,
            attack_detected: result.is_attack(),
            reason: result.is_attack().then_some(result.reason.as_str()),
        }
    }
}

/// Process-wide log setup for the binary. Diagnostics go to stderr so stdout carries
/// only the batch report.
pub struct StructuredLogger;

impl StructuredLogger {
    /// Install the global subscriber once: `json` picks ndjson over the human format,
    /// RUST_LOG wins over the configured `default_level`. A second call is a no-op.
    pub fn init(json: bool, default_level: &str) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
        if json {
            let fmt = tracing_subscriber::fmt::layer()
                .json()
                .with_span_events(FmtSpan::NONE)
                .with_writer(std::io::stderr);
            let _ = tracing_subscriber::registry().with(filter).with(fmt).try_init();
        } else {
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init();
        }
    }

    /// Write one alert as a single ndjson line, bypassing the subscriber so the line
    /// shape stays stable regardless of log level or formatter.
    pub fn emit_json(event: &impl Serialize, w: &mut impl Write) {
        if let Ok(line) = serde_json::to_string(event) {
            let _ = writeln!(w, "{}", line);
        }
    }
}
