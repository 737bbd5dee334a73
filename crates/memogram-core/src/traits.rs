//! Core traits for memogram abstractions.
//!
//! These traits define the interfaces that concrete implementations must
//! satisfy, enabling pluggable backends and testability. The relay loop and
//! finalizer only ever see these seams; the Telegram and Blinko clients slot
//! in behind them.

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Attachment, AttachmentDescriptor, MessageRef};

/// Inbound-side capabilities the relay needs from the chat platform:
/// resolving attachment bytes and sending/editing the status reply.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Resolve the attachment's remote handle and write the bytes to `dest`.
    async fn download_attachment(&self, attachment: &Attachment, dest: &Path) -> Result<()>;

    /// Reply to a message, returning a reference to the new reply so it can
    /// be edited later.
    async fn send_reply(&self, to: MessageRef, text: &str) -> Result<MessageRef>;

    /// Replace the text of a previously sent message.
    async fn edit_message(&self, message: MessageRef, text: &str) -> Result<()>;
}

/// Uploads a single binary blob to the storage backend.
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Upload the file at `path` under `file_name`, returning the stored
    /// descriptor on success.
    async fn upload_file(&self, path: &Path, file_name: &str) -> Result<AttachmentDescriptor>;
}

/// Submits final textual content plus stored-file descriptors as one note.
#[async_trait]
pub trait NoteStore: Send + Sync {
    async fn create_note(
        &self,
        content: &str,
        attachments: Vec<AttachmentDescriptor>,
    ) -> Result<()>;
}
