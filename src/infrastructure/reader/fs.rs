//! Filesystem attachment reader

use async_trait::async_trait;

use crate::application::ports::AttachmentReader;
use crate::domain::analysis::{Attachment, BinarySource};

/// Reads file-backed attachments with tokio; in-memory attachments are copied
#[derive(Debug, Clone, Copy, Default)]
pub struct FsAttachmentReader;

impl FsAttachmentReader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AttachmentReader for FsAttachmentReader {
    async fn read(&self, attachment: &Attachment) -> std::io::Result<Vec<u8>> {
        match attachment.source() {
            BinarySource::Bytes(bytes) => Ok(bytes.clone()),
            BinarySource::File(path) => tokio::fs::read(path).await,
        }
    }
}
