//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod dispatcher;
pub mod reader;
pub mod telemetry;

// Re-export common types
pub use config::ConfigStore;
pub use dispatcher::{DispatchError, Dispatcher};
pub use reader::AttachmentReader;
pub use telemetry::{TelemetryError, TelemetryRecord, TelemetrySink};
