//! Clinical analysis domain module

mod attachment;
mod encoded_part;
mod media_type;
mod model;
mod payload;
mod prompt;
mod request;

pub use attachment::{human_readable_size, Attachment, BinarySource};
pub use encoded_part::EncodedPart;
pub use media_type::{MediaType, ALL_MEDIA_TYPES};
pub use model::{ModelFamily, ModelSelector, CUSTOM_SELECTOR, DEFAULT_MODEL};
pub use payload::{InferencePayload, PayloadPart};
pub use prompt::{
    InstructionPrompt, ANALYSIS_HEADING, PLAN_HEADING, RATIONALE_HEADING, REQUIRED_HEADINGS,
};
pub use request::{AnalysisRequest, AnalysisResult};
