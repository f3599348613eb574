//! Request timeout value object

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::error::DurationParseError;

/// Default upstream request timeout (2 minutes)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// How long a single upstream analysis call may take.
/// Parsed from strings like "90s", "2m" or "1m30s"; never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTimeout {
    secs: u64,
}

impl RequestTimeout {
    pub const fn from_secs(secs: u64) -> Self {
        Self { secs }
    }

    pub const fn as_secs(&self) -> u64 {
        self.secs
    }

    pub const fn as_std(&self) -> Duration {
        Duration::from_secs(self.secs)
    }
}

impl Default for RequestTimeout {
    fn default() -> Self {
        Self::from_secs(DEFAULT_TIMEOUT_SECS)
    }
}

impl FromStr for RequestTimeout {
    type Err = DurationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DurationParseError {
            input: s.to_string(),
        };
        let input = s.trim().to_lowercase();

        let mut total: u64 = 0;
        let mut digits = String::new();
        let mut seen_minutes = false;
        let mut seen_seconds = false;

        for ch in input.chars() {
            match ch {
                '0'..='9' => digits.push(ch),
                'm' if !digits.is_empty() && !seen_minutes && !seen_seconds => {
                    let n: u64 = digits.parse().map_err(|_| invalid())?;
                    total = n
                        .checked_mul(60)
                        .and_then(|secs| total.checked_add(secs))
                        .ok_or_else(invalid)?;
                    digits.clear();
                    seen_minutes = true;
                }
                's' if !digits.is_empty() && !seen_seconds => {
                    let n: u64 = digits.parse().map_err(|_| invalid())?;
                    total = total.checked_add(n).ok_or_else(invalid)?;
                    digits.clear();
                    seen_seconds = true;
                }
                _ => return Err(invalid()),
            }
        }

        if !digits.is_empty() || total == 0 {
            return Err(invalid());
        }

        Ok(Self { secs: total })
    }
}

impl fmt::Display for RequestTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (minutes, seconds) = (self.secs / 60, self.secs % 60);
        match (minutes, seconds) {
            (0, s) => write!(f, "{}s", s),
            (m, 0) => write!(f, "{}m", m),
            (m, s) => write!(f, "{}m{}s", m, s),
        }
    }
}
