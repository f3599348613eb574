//! Gemini API dispatcher adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::application::ports::{DispatchError, Dispatcher};
use crate::application::MISSING_KEY_MESSAGE;
use crate::domain::analysis::{
    AnalysisResult, InferencePayload, ModelFamily, ModelSelector, PayloadPart,
};
use crate::domain::config::RequestTimeout;

/// Gemini API base URL
pub const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Low randomness for reproducible clinical reasoning
const TEMPERATURE: f32 = 0.2;

/// Upper bound on generated tokens
const MAX_OUTPUT_TOKENS: u32 = 8192;

const MISSING_ENDPOINT_MESSAGE: &str = "No custom endpoint configured. Set one via 'clinical-analyst config set custom_endpoint <url>'";

// Request types for Gemini API

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'static str,
    data: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

// Response types for Gemini API

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: Option<String>,
}

/// Resolved upstream target for one request
#[derive(Debug, PartialEq, Eq)]
enum Endpoint {
    /// Credential travels as the `key` query parameter
    Keyed { url: String, key: String },
    /// Credential, if any, travels as a bearer token
    Open { url: Url, token: Option<String> },
}

/// Dispatcher for the Gemini `generateContent` wire format.
///
/// Gemini models go to the hosted API; the `custom` model goes to the
/// configured endpoint.
pub struct GeminiDispatcher {
    client: reqwest::Client,
    base_url: String,
    custom_endpoint: Option<String>,
}

impl GeminiDispatcher {
    /// Create a dispatcher for the hosted Gemini API
    pub fn new() -> Self {
        Self::with_timeout(RequestTimeout::default())
    }

    /// Create a dispatcher with a per-request timeout
    pub fn with_timeout(timeout: RequestTimeout) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout.as_std())
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, timeout = %timeout, "HTTP client setup failed; using defaults without a request timeout");
                reqwest::Client::new()
            });

        Self {
            client,
            base_url: API_BASE_URL.to_string(),
            custom_endpoint: None,
        }
    }

    /// Override the Gemini base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the endpoint used by the `custom` model
    pub fn with_custom_endpoint(mut self, endpoint: Option<String>) -> Self {
        self.custom_endpoint = endpoint;
        self
    }

    /// Build the URL for a Gemini model, without the credential
    fn model_url(&self, model: &ModelSelector) -> String {
        format!("{}/{}:generateContent", self.base_url, model.name())
    }

    fn resolve(
        &self,
        credential: Option<&str>,
        model: &ModelSelector,
    ) -> Result<Endpoint, DispatchError> {
        match model.family() {
            ModelFamily::Gemini => {
                let key = credential
                    .ok_or_else(|| DispatchError::Configuration(MISSING_KEY_MESSAGE.to_string()))?;
                Ok(Endpoint::Keyed {
                    url: self.model_url(model),
                    key: key.to_string(),
                })
            }
            ModelFamily::Custom => {
                let raw = self
                    .custom_endpoint
                    .as_deref()
                    .ok_or_else(|| DispatchError::Configuration(MISSING_ENDPOINT_MESSAGE.to_string()))?;
                let url = parse_endpoint(raw).map_err(DispatchError::Configuration)?;
                Ok(Endpoint::Open {
                    url,
                    token: credential.map(str::to_string),
                })
            }
        }
    }

    /// Build the request body
    fn build_request(payload: &InferencePayload) -> GenerateContentRequest<'_> {
        let parts = payload
            .parts()
            .iter()
            .map(|part| match part {
                PayloadPart::Text(text) => Part::Text {
                    text: text.as_str(),
                },
                PayloadPart::Inline(encoded) => Part::Inline {
                    inline_data: InlineData {
                        mime_type: encoded.media_type().as_str(),
                        data: encoded.data(),
                    },
                },
            })
            .collect();

        GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts,
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        }
    }

    /// Extract the first text part of the first candidate
    fn extract_text(response: GenerateContentResponse) -> Option<String> {
        response
            .candidates?
            .into_iter()
            .next()?
            .content?
            .parts?
            .into_iter()
            .next()?
            .text
    }

    /// Classify a non-success response body
    fn upstream_error(status: reqwest::StatusCode, body: &str) -> DispatchError {
        let message = serde_json::from_str::<ErrorEnvelope>(body)
            .ok()
            .and_then(|envelope| envelope.error)
            .and_then(|error| error.message)
            .filter(|m| !m.trim().is_empty());

        DispatchError::Upstream(message.unwrap_or_else(|| {
            format!(
                "The analysis service returned an error (HTTP {})",
                status.as_u16()
            )
        }))
    }

    /// Parse a success response body
    fn parse_success(body: &str) -> Result<AnalysisResult, DispatchError> {
        let response: GenerateContentResponse = serde_json::from_str(body).map_err(|e| {
            DispatchError::Upstream(format!("Malformed response from the analysis service: {}", e))
        })?;

        if let Some(message) = response.error.as_ref().and_then(|e| e.message.clone()) {
            return Err(DispatchError::Upstream(message));
        }

        Self::extract_text(response)
            .and_then(AnalysisResult::new)
            .ok_or(DispatchError::EmptyResult)
    }
}

impl Default for GeminiDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate a custom endpoint URL
pub fn parse_endpoint(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|e| format!("Invalid endpoint URL '{}': {}", raw, e))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!(
            "Invalid endpoint URL '{}': scheme must be http or https, not {}",
            raw, other
        )),
    }
}

/// Short description of a transport failure. Never includes the URL, which
/// may carry the credential.
fn describe_transport_error(err: reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        "connection failed".to_string()
    } else {
        err.without_url().to_string()
    }
}

#[async_trait]
impl Dispatcher for GeminiDispatcher {
    async fn dispatch(
        &self,
        payload: &InferencePayload,
        credential: Option<&str>,
        model: &ModelSelector,
    ) -> Result<AnalysisResult, DispatchError> {
        let endpoint = self.resolve(credential, model)?;
        let body = Self::build_request(payload);

        debug!(
            model = %model,
            family = model.family().label(),
            parts = payload.len(),
            "dispatching analysis request"
        );

        let request = match endpoint {
            Endpoint::Keyed { url, key } => self.client.post(url).query(&[("key", key)]),
            Endpoint::Open { url, token } => {
                let request = self.client.post(url);
                match token {
                    Some(token) => request.bearer_auth(token),
                    None => request,
                }
            }
        };

        let response = request
            .json(&body)
            .send()
            .await
            .map_err(|e| DispatchError::Network(describe_transport_error(e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| DispatchError::Network(describe_transport_error(e)))?;

        debug!(status = status.as_u16(), bytes = text.len(), "analysis response received");

        if !status.is_success() {
            return Err(Self::upstream_error(status, &text));
        }

        Self::parse_success(&text)
    }
}
