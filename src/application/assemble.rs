//! Request assembly: attachment encoding and payload construction

use thiserror::Error;

use crate::domain::analysis::{AnalysisRequest, Attachment, EncodedPart, InferencePayload, InstructionPrompt};
use crate::domain::error::MediaTypeError;

use super::ports::{AttachmentReader, DispatchError};

/// Hint shown when a credentialed model is selected without an API key
pub const MISSING_KEY_MESSAGE: &str = "Missing API key. Set GEMINI_API_KEY or configure via 'clinical-analyst config set api_key <key>'";

/// Errors from assembling or running an analysis
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("{0}")]
    Configuration(String),

    #[error("Could not read \"{name}\": {message}")]
    Io { name: String, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] MediaTypeError),

    #[error("{0}")]
    Upstream(String),

    #[error("The analysis service returned no content. Please try again.")]
    EmptyResult,

    #[error("Could not reach the analysis service ({0}). Check your API key and network connection.")]
    Network(String),
}

impl From<DispatchError> for AnalysisError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::Upstream(message) => Self::Upstream(message),
            DispatchError::EmptyResult => Self::EmptyResult,
            DispatchError::Network(message) => Self::Network(message),
            DispatchError::Configuration(message) => Self::Configuration(message),
        }
    }
}

/// Read an attachment to completion and re-encode it as base64.
pub async fn encode<R: AttachmentReader + ?Sized>(
    reader: &R,
    attachment: &Attachment,
) -> Result<EncodedPart, AnalysisError> {
    let bytes = reader
        .read(attachment)
        .await
        .map_err(|e| AnalysisError::Io {
            name: attachment.name().to_string(),
            message: e.to_string(),
        })?;

    Ok(EncodedPart::encode(&bytes, attachment.media_type()))
}

/// Build the payload for a request.
///
/// Fails before any read when the credential is missing for a credentialed
/// model, or when an attachment is in the wrong slot.
pub async fn build_payload<R: AttachmentReader + ?Sized>(
    reader: &R,
    request: &AnalysisRequest,
) -> Result<InferencePayload, AnalysisError> {
    assemble(reader, request, &|_: &str, _: usize| {}).await
}

/// Build the payload, reporting each encoded binary as (name, size in bytes).
pub(crate) async fn assemble<R: AttachmentReader + ?Sized>(
    reader: &R,
    request: &AnalysisRequest,
    on_encoded: &(dyn Fn(&str, usize) + Send + Sync),
) -> Result<InferencePayload, AnalysisError> {
    if !request.has_required_credential() {
        return Err(AnalysisError::Configuration(MISSING_KEY_MESSAGE.to_string()));
    }

    for attachment in &request.attachments {
        attachment.ensure_attachment()?;
    }
    if let Some(audio) = &request.audio {
        audio.ensure_audio()?;
    }

    let mut payload =
        InferencePayload::new(InstructionPrompt::build(&request.history, &request.examination));

    // Attachments in submission order, then audio
    for attachment in request.attachments.iter().chain(request.audio.as_ref()) {
        let part = encode(reader, attachment).await?;
        on_encoded(attachment.name(), part.raw_len());
        payload.push(part);
    }

    Ok(payload)
}
