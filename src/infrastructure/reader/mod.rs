//! Attachment reader adapters

mod fs;

pub use fs::FsAttachmentReader;
