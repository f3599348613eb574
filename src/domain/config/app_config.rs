//! Application configuration value object

use serde::{Deserialize, Serialize};

use super::timeout::RequestTimeout;
use crate::domain::analysis::{ModelSelector, DEFAULT_MODEL};
use crate::domain::error::{DurationParseError, InvalidModelError};

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub custom_endpoint: Option<String>,
    pub telemetry: Option<bool>,
    pub request_timeout: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            api_key: None,
            model: Some(DEFAULT_MODEL.to_string()),
            custom_endpoint: None,
            telemetry: Some(false),
            request_timeout: Some(RequestTimeout::default().to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            api_key: other.api_key.or(self.api_key),
            model: other.model.or(self.model),
            custom_endpoint: other.custom_endpoint.or(self.custom_endpoint),
            telemetry: other.telemetry.or(self.telemetry),
            request_timeout: other.request_timeout.or(self.request_timeout),
        }
    }

    /// Get the API key if set and non-blank
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// Get model as parsed ModelSelector, or default if not set
    pub fn model_or_default(&self) -> Result<ModelSelector, InvalidModelError> {
        self.model
            .as_deref()
            .map(str::parse::<ModelSelector>)
            .transpose()
            .map(Option::unwrap_or_default)
    }

    /// Get the custom endpoint if set and non-blank
    pub fn custom_endpoint(&self) -> Option<&str> {
        self.custom_endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }

    /// Get telemetry opt-in, or false if not set
    pub fn telemetry_or_default(&self) -> bool {
        self.telemetry.unwrap_or(false)
    }

    /// Get request timeout as parsed value, or default if not set
    pub fn request_timeout_or_default(&self) -> Result<RequestTimeout, DurationParseError> {
        self.request_timeout
            .as_deref()
            .map(str::parse::<RequestTimeout>)
            .transpose()
            .map(Option::unwrap_or_default)
    }
}
