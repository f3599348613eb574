//! Attachment reader port interface

use async_trait::async_trait;

use crate::domain::analysis::Attachment;

/// Port for reading an attachment's binary content to completion
#[async_trait]
pub trait AttachmentReader: Send + Sync {
    async fn read(&self, attachment: &Attachment) -> std::io::Result<Vec<u8>>;
}
