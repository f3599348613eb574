//! Domain layer - Core business logic
//!
//! Contains value objects, the markdown report tree, and domain errors.
//! This layer has no dependencies on external systems.

pub mod analysis;
pub mod config;
pub mod error;
pub mod report;

// Re-export common types
pub use analysis::{
    AnalysisRequest, AnalysisResult, Attachment, EncodedPart, InferencePayload, InstructionPrompt,
    MediaType, ModelFamily, ModelSelector,
};
pub use config::{AppConfig, RequestTimeout};
pub use error::*;
pub use report::Report;
