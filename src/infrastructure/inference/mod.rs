//! Inference dispatch adapters

mod gemini;

pub use gemini::{parse_endpoint, GeminiDispatcher, API_BASE_URL};
