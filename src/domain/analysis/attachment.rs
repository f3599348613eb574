//! Attachment value object

use std::path::{Path, PathBuf};

use super::media_type::MediaType;
use crate::domain::error::MediaTypeError;

/// Where the binary content of an attachment lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinarySource {
    /// Already in memory
    Bytes(Vec<u8>),
    /// Read lazily from disk when the attachment is encoded
    File(PathBuf),
}

/// A user-supplied binary (clinical image, PDF or audio recording) with its
/// declared media type and display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    name: String,
    media_type: MediaType,
    source: BinarySource,
}

impl Attachment {
    /// Create an attachment from in-memory bytes
    pub fn from_bytes(name: impl Into<String>, media_type: MediaType, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type,
            source: BinarySource::Bytes(data),
        }
    }

    /// Create a file-backed attachment, detecting the media type from its extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MediaTypeError> {
        let path = path.as_ref();
        let media_type = MediaType::from_path(path)?;
        Ok(Self::from_path_with_type(path, media_type))
    }

    /// Create a file-backed attachment with an explicit media type
    pub fn from_path_with_type(path: impl AsRef<Path>, media_type: MediaType) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());

        Self {
            name,
            media_type,
            source: BinarySource::File(path.to_path_buf()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn source(&self) -> &BinarySource {
        &self.source
    }

    /// Ensure this attachment may go in the clinical attachment list
    pub fn ensure_attachment(&self) -> Result<(), MediaTypeError> {
        if self.media_type.is_attachment() {
            Ok(())
        } else {
            Err(MediaTypeError::NotAnAttachment {
                name: self.name.clone(),
                media_type: self.media_type.to_string(),
            })
        }
    }

    /// Ensure this attachment may be used as the audio clip
    pub fn ensure_audio(&self) -> Result<(), MediaTypeError> {
        if self.media_type.is_audio() {
            Ok(())
        } else {
            Err(MediaTypeError::NotAudio {
                name: self.name.clone(),
                media_type: self.media_type.to_string(),
            })
        }
    }
}

/// Human-readable byte size
pub fn human_readable_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
