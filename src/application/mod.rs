//! Application layer - Use cases and port interfaces
//!
//! Contains the request assembly operations, the analysis use case,
//! and trait definitions for external system interactions.

pub mod analyze;
pub mod assemble;
pub mod ports;

// Re-export use cases
pub use analyze::{telemetry_record, AnalysisCallbacks, AnalysisOutput, AnalyzeCaseUseCase};
pub use assemble::{build_payload, encode, AnalysisError, MISSING_KEY_MESSAGE};
