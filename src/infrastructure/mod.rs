//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like the Gemini API and the filesystem.

pub mod config;
pub mod inference;
pub mod reader;
pub mod telemetry;

// Re-export adapters
pub use config::XdgConfigStore;
pub use inference::GeminiDispatcher;
pub use reader::FsAttachmentReader;
pub use telemetry::TracingTelemetrySink;
