//! Analysis request and result

use std::fmt;

use super::attachment::Attachment;
use super::model::ModelSelector;

/// Everything the clinician submitted for one analysis.
#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    /// Free-text patient history
    pub history: String,
    /// Free-text examination findings
    pub examination: String,
    /// Clinical images and PDF documents, in submission order
    pub attachments: Vec<Attachment>,
    /// Optional recorded audio clip; always encoded last
    pub audio: Option<Attachment>,
    /// API credential; may be absent for anonymous endpoint families
    pub credential: Option<String>,
    /// Target model
    pub model: ModelSelector,
    /// Emit a counts-only diagnostic record before dispatch
    pub telemetry_opt_in: bool,
}

impl AnalysisRequest {
    /// The credential, if present and non-blank
    pub fn credential(&self) -> Option<&str> {
        self.credential
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    /// Whether the credential invariant holds for the selected model
    pub fn has_required_credential(&self) -> bool {
        self.credential().is_some() || !self.model.requires_credential()
    }

    /// Whether the request carries no clinical input at all
    pub fn is_empty(&self) -> bool {
        self.history.trim().is_empty()
            && self.examination.trim().is_empty()
            && self.attachments.is_empty()
            && self.audio.is_none()
    }

    /// Number of payload parts this request produces
    pub fn expected_part_count(&self) -> usize {
        1 + self.attachments.len() + usize::from(self.audio.is_some())
    }
}

/// Markdown text returned by the upstream model. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    text: String,
}

impl AnalysisResult {
    /// Wrap upstream text, returning None when it is blank
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            None
        } else {
            Some(Self { text })
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for AnalysisResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
