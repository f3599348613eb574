//! Telemetry sink adapters

mod tracing_sink;

pub use tracing_sink::{TracingTelemetrySink, TELEMETRY_TARGET};
