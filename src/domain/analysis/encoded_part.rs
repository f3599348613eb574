//! Encoded part value object

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::media_type::MediaType;

/// A binary payload re-encoded as base64 text, ready for JSON transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPart {
    data: String,
    media_type: MediaType,
    raw_len: usize,
}

impl EncodedPart {
    /// Encode raw bytes
    pub fn encode(bytes: &[u8], media_type: MediaType) -> Self {
        Self {
            data: STANDARD.encode(bytes),
            media_type,
            raw_len: bytes.len(),
        }
    }

    /// Base64 text without any data-URI prefix
    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    /// Size of the original binary in bytes
    pub fn raw_len(&self) -> usize {
        self.raw_len
    }

    /// Decode back into the original bytes
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decodes_to_original_bytes() {
        let bytes: Vec<u8> = (0..=255).collect();
        let part = EncodedPart::encode(&bytes, MediaType::Pdf);
        assert_eq!(part.decode().unwrap(), bytes);
        assert_eq!(part.raw_len(), 256);
        assert_eq!(part.media_type(), MediaType::Pdf);
    }

    #[test]
    fn encode_has_no_data_uri_prefix() {
        let part = EncodedPart::encode(b"hello", MediaType::Png);
        assert_eq!(part.data(), "aGVsbG8=");
        assert!(!part.data().starts_with("data:"));
    }

    #[test]
    fn encode_empty_binary() {
        let part = EncodedPart::encode(&[], MediaType::Jpeg);
        assert_eq!(part.data(), "");
        assert_eq!(part.raw_len(), 0);
    }
}
