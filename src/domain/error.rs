//! Domain error types

use thiserror::Error;

/// Error when parsing a duration string
#[derive(Debug, Clone, Error)]
#[error("Invalid duration format: \"{input}\". Expected format: <number>s, <number>m, or <number>m<number>s (e.g., 30s, 1m, 2m30s)")]
pub struct DurationParseError {
    pub input: String,
}

/// Error when an invalid model selector is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid model: \"{input}\". Use a Gemini model name (e.g., gemini-2.5-flash) or 'custom'")]
pub struct InvalidModelError {
    pub input: String,
}

/// Error when a media type is blank, unknown, or not allowed in its slot
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaTypeError {
    #[error("Media type must not be blank")]
    Blank,

    #[error("Unsupported media type: \"{0}\"")]
    Unsupported(String),

    #[error("Cannot determine media type of \"{0}\"")]
    Undetectable(String),

    #[error("\"{name}\" is {media_type}; attachments must be images or PDF documents")]
    NotAnAttachment { name: String, media_type: String },

    #[error("\"{name}\" is {media_type}; the audio clip must be an audio file")]
    NotAudio { name: String, media_type: String },
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
