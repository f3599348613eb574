//! Model selector value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidModelError;

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Selector string that routes requests to the user-configured endpoint
pub const CUSTOM_SELECTOR: &str = "custom";

/// Upstream endpoint families. Each family has its own URL scheme and
/// credential requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelFamily {
    /// Hosted Gemini API; the credential travels as the `key` query parameter
    Gemini,
    /// User-configured endpoint speaking the same wire format
    Custom,
}

impl ModelFamily {
    /// Whether requests to this family must carry a credential
    pub const fn requires_credential(&self) -> bool {
        match self {
            Self::Gemini => true,
            Self::Custom => false,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Gemini => "Google Gemini",
            Self::Custom => "Custom endpoint",
        }
    }
}

/// Identifies which upstream model handles a request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelSelector {
    name: String,
}

impl ModelSelector {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn family(&self) -> ModelFamily {
        if self.name == CUSTOM_SELECTOR {
            ModelFamily::Custom
        } else {
            ModelFamily::Gemini
        }
    }

    pub fn requires_credential(&self) -> bool {
        self.family().requires_credential()
    }
}

impl Default for ModelSelector {
    fn default() -> Self {
        Self {
            name: DEFAULT_MODEL.to_string(),
        }
    }
}

impl FromStr for ModelSelector {
    type Err = InvalidModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let name = name.strip_prefix("models/").unwrap_or(name);

        // The name is embedded in a URL path segment
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_'));

        if !valid {
            return Err(InvalidModelError {
                input: s.to_string(),
            });
        }

        let name = if name.eq_ignore_ascii_case(CUSTOM_SELECTOR) {
            CUSTOM_SELECTOR.to_string()
        } else {
            name.to_string()
        };

        Ok(Self { name })
    }
}

impl fmt::Display for ModelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
