//! User-visible texts for the status reply.
//!
//! One reply per group (or per text message) is sent and then edited in
//! place until it reaches a terminal state; a group is never left without an
//! explicit success or failure text.

pub const TEXT_SAVING: &str = "Got it, saving...";
pub const SAVED: &str = "Saved";
pub const TEXT_SAVE_FAILED: &str = "Save failed";

pub const CREATING_NOTE: &str = "All files uploaded, creating note...";
pub const ALL_UPLOADS_FAILED: &str = "Save failed: all file uploads failed.";
pub const NOTE_FAILED: &str = "Save failed: note creation failed.";

pub fn processing(files: usize) -> String {
    format!("Processing a message with {files} file(s)...")
}

pub fn uploading(index: usize, total: usize) -> String {
    format!("Uploading file {index}/{total}...")
}

/// Note content when no message in the group carried a caption.
pub fn placeholder_caption(messages: usize) -> &'static str {
    if messages == 1 {
        "File from Telegram"
    } else {
        "Media group from Telegram"
    }
}
