//! Group finalization: drain, upload, write one note.

use std::sync::Arc;

use tracing::{error, info, warn};

use memogram_core::{
    Attachment, AttachmentDescriptor, AttachmentStore, ChatTransport, MessageRef, NoteStore,
    Result,
};

use crate::group::GroupRecord;
use crate::status;

/// Turns a drained [`GroupRecord`] into one Blinko note.
///
/// Uploads run strictly in arrival order so the status reply's progress text
/// stays monotonic. A failed attachment is logged and skipped; only zero
/// successful uploads (or the final note write failing) fails the group.
/// Nothing here retries, and nothing here is allowed to escape: every path
/// ends in a terminal status edit.
pub struct Finalizer {
    transport: Arc<dyn ChatTransport>,
    attachments: Arc<dyn AttachmentStore>,
    notes: Arc<dyn NoteStore>,
}

impl Finalizer {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        attachments: Arc<dyn AttachmentStore>,
        notes: Arc<dyn NoteStore>,
    ) -> Self {
        Self {
            transport,
            attachments,
            notes,
        }
    }

    /// Process a group whose quiet window has elapsed. The record was
    /// already removed from the table; this consumes it.
    pub async fn finalize(&self, group_id: &str, record: GroupRecord) {
        let messages = record.messages;
        let total = messages.iter().filter(|m| m.attachment.is_some()).count();
        info!(
            group_id,
            messages = messages.len(),
            files = total,
            "Finalizing group"
        );

        let status = self
            .open_status(record.reply_to, &status::processing(total))
            .await;

        // First non-empty caption in arrival order names the note.
        let caption = messages
            .iter()
            .find_map(|m| m.caption())
            .map(str::to_string)
            .unwrap_or_else(|| status::placeholder_caption(messages.len()).to_string());

        let mut descriptors = Vec::new();
        let mut index = 0;
        for message in &messages {
            let Some(attachment) = &message.attachment else {
                continue;
            };
            index += 1;
            self.update_status(&status, &status::uploading(index, total))
                .await;

            match self.upload_one(attachment).await {
                Ok(descriptor) => descriptors.push(descriptor),
                Err(e) => {
                    warn!(
                        group_id,
                        kind = attachment.kind(),
                        file = %attachment.suggested_name(),
                        error = %e,
                        "Attachment upload failed, skipping"
                    );
                }
            }
        }

        if descriptors.is_empty() {
            warn!(group_id, "Every upload failed, no note written");
            self.update_status(&status, status::ALL_UPLOADS_FAILED).await;
            return;
        }

        self.update_status(&status, status::CREATING_NOTE).await;

        let uploaded = descriptors.len();
        match self.notes.create_note(&caption, descriptors).await {
            Ok(()) => {
                info!(group_id, attachments = uploaded, failed = total - uploaded, "Group saved");
                self.update_status(&status, status::SAVED).await;
            }
            Err(e) => {
                error!(group_id, error = %e, "Note creation failed");
                self.update_status(&status, status::NOTE_FAILED).await;
            }
        }
    }

    /// Save a plain-text message as a note immediately; no debounce, no
    /// attachments.
    pub async fn save_text(&self, reply_to: MessageRef, text: &str) {
        let status = self.open_status(reply_to, status::TEXT_SAVING).await;

        match self.notes.create_note(text, Vec::new()).await {
            Ok(()) => {
                info!("Text note saved");
                self.update_status(&status, status::SAVED).await;
            }
            Err(e) => {
                error!(error = %e, "Text note creation failed");
                self.update_status(&status, status::TEXT_SAVE_FAILED).await;
            }
        }
    }

    /// Download one attachment into a transient location and upload it.
    /// The tempdir (and the local copy inside it) is removed when this
    /// returns, on success and failure alike.
    async fn upload_one(&self, attachment: &Attachment) -> Result<AttachmentDescriptor> {
        let name = attachment.suggested_name();
        let dir = tempfile::tempdir()?;
        let dest = dir.path().join(&name);

        self.transport.download_attachment(attachment, &dest).await?;
        self.attachments.upload_file(&dest, &name).await
    }

    async fn open_status(&self, reply_to: MessageRef, text: &str) -> Option<MessageRef> {
        match self.transport.send_reply(reply_to, text).await {
            Ok(reply) => Some(reply),
            Err(e) => {
                // The group still completes; it just loses progress updates.
                warn!(error = %e, "Failed to send status reply");
                None
            }
        }
    }

    async fn update_status(&self, status: &Option<MessageRef>, text: &str) {
        if let Some(reply) = status {
            if let Err(e) = self.transport.edit_message(*reply, text).await {
                warn!(error = %e, "Failed to edit status reply");
            }
        }
    }
}
