//! Telemetry port interface

use thiserror::Error;

/// Counts-only description of a request. Never carries field contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TelemetryRecord {
    pub model: String,
    pub history_chars: usize,
    pub examination_chars: usize,
    pub attachment_count: usize,
    pub attachment_bytes: usize,
    pub has_audio: bool,
    pub audio_bytes: usize,
    pub part_count: usize,
}

/// Telemetry errors
#[derive(Debug, Clone, Error)]
pub enum TelemetryError {
    #[error("Telemetry sink unavailable: {0}")]
    Unavailable(String),
}

/// Port for a local diagnostics sink.
///
/// Emission is synchronous and must not block; callers ignore failures.
pub trait TelemetrySink: Send + Sync {
    fn record(&self, record: &TelemetryRecord) -> Result<(), TelemetryError>;
}
