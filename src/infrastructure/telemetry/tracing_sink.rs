//! Tracing-backed telemetry sink

use tracing::info;

use crate::application::ports::{TelemetryError, TelemetryRecord, TelemetrySink};

/// Target under which telemetry events are emitted
pub const TELEMETRY_TARGET: &str = "telemetry";

/// Writes each record as a structured `tracing` event on the
/// [`TELEMETRY_TARGET`] target. Filter with `RUST_LOG=telemetry=info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTelemetrySink;

impl TracingTelemetrySink {
    pub fn new() -> Self {
        Self
    }
}

impl TelemetrySink for TracingTelemetrySink {
    fn record(&self, record: &TelemetryRecord) -> Result<(), TelemetryError> {
        info!(
            target: TELEMETRY_TARGET,
            model = %record.model,
            history_chars = record.history_chars,
            examination_chars = record.examination_chars,
            attachment_count = record.attachment_count,
            attachment_bytes = record.attachment_bytes,
            has_audio = record.has_audio,
            audio_bytes = record.audio_bytes,
            part_count = record.part_count,
            "analysis request"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_without_subscriber_succeeds() {
        let record = TelemetryRecord {
            model: "gemini-2.5-flash".to_string(),
            attachment_count: 2,
            ..Default::default()
        };
        assert!(TracingTelemetrySink::new().record(&record).is_ok());
    }
}
