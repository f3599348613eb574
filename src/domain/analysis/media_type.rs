//! Media type value object

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::domain::error::MediaTypeError;

/// Media types the analysis endpoint accepts as inline data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Png,
    Jpeg,
    Webp,
    Gif,
    Heic,
    Heif,
    Pdf,
    Webm,
    Ogg,
    Mp3,
    Mpeg,
    Wav,
    Flac,
    Mp4,
    Aac,
}

/// All known media types
pub const ALL_MEDIA_TYPES: &[MediaType] = &[
    MediaType::Png,
    MediaType::Jpeg,
    MediaType::Webp,
    MediaType::Gif,
    MediaType::Heic,
    MediaType::Heif,
    MediaType::Pdf,
    MediaType::Webm,
    MediaType::Ogg,
    MediaType::Mp3,
    MediaType::Mpeg,
    MediaType::Wav,
    MediaType::Flac,
    MediaType::Mp4,
    MediaType::Aac,
];

impl MediaType {
    /// Get the MIME type string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Webp => "image/webp",
            Self::Gif => "image/gif",
            Self::Heic => "image/heic",
            Self::Heif => "image/heif",
            Self::Pdf => "application/pdf",
            Self::Webm => "audio/webm",
            Self::Ogg => "audio/ogg",
            Self::Mp3 => "audio/mp3",
            Self::Mpeg => "audio/mpeg",
            Self::Wav => "audio/wav",
            Self::Flac => "audio/flac",
            Self::Mp4 => "audio/mp4",
            Self::Aac => "audio/aac",
        }
    }

    /// Whether this type may be uploaded as a clinical attachment (images and PDF)
    pub const fn is_attachment(&self) -> bool {
        matches!(
            self,
            Self::Png | Self::Jpeg | Self::Webp | Self::Gif | Self::Heic | Self::Heif | Self::Pdf
        )
    }

    /// Whether this type is an audio recording
    pub const fn is_audio(&self) -> bool {
        !self.is_attachment()
    }

    /// Detect the media type from a file name or path extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MediaTypeError> {
        let path = path.as_ref();
        let display = path.to_string_lossy().to_string();

        // mime_guess knows webm only as video; a recorded clip is always audio here
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("webm") => return Ok(Self::Webm),
            Some("m4a") => return Ok(Self::Mp4),
            _ => {}
        }

        let guessed = mime_guess::from_path(path)
            .first()
            .ok_or_else(|| MediaTypeError::Undetectable(display.clone()))?;

        guessed
            .essence_str()
            .parse()
            .map_err(|_| MediaTypeError::Undetectable(display))
    }
}

impl FromStr for MediaType {
    type Err = MediaTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(MediaTypeError::Blank);
        }

        let parsed = match normalized.as_str() {
            "image/jpg" => Some(Self::Jpeg),
            "audio/x-wav" | "audio/wave" => Some(Self::Wav),
            "audio/x-flac" => Some(Self::Flac),
            "audio/x-m4a" | "audio/m4a" => Some(Self::Mp4),
            other => ALL_MEDIA_TYPES.iter().copied().find(|m| m.as_str() == other),
        };

        parsed.ok_or(MediaTypeError::Unsupported(s.to_string()))
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
