//! Inference dispatch port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::analysis::{AnalysisResult, InferencePayload, ModelSelector};

/// Dispatch errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// Non-success response; carries the upstream message when one was provided
    #[error("{0}")]
    Upstream(String),

    #[error("The analysis service returned no content. Please try again.")]
    EmptyResult,

    #[error("Could not reach the analysis service ({0}). Check your API key and network connection.")]
    Network(String),

    #[error("{0}")]
    Configuration(String),
}

/// Port for sending a payload to the inference endpoint
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Send the payload to the endpoint selected by `model`.
    ///
    /// # Arguments
    /// * `payload` - Instruction text followed by encoded binaries
    /// * `credential` - API credential, if any
    /// * `model` - Target model; its family decides URL and authentication
    ///
    /// # Returns
    /// The first generated text segment or a classified error
    async fn dispatch(
        &self,
        payload: &InferencePayload,
        credential: Option<&str>,
        model: &ModelSelector,
    ) -> Result<AnalysisResult, DispatchError>;
}
