//! Domain models shared across the memogram crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::defaults;

/// A stable reference to a Telegram message.
///
/// This is the coordinate used both for replying to an inbound message and
/// for editing the status reply afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub chat_id: i64,
    pub message_id: i64,
}

/// File payload of an inbound message, tagged by kind.
///
/// Each variant carries the remote handle needed to retrieve the bytes plus
/// whatever the platform offers toward a file name. Photos are already
/// resolved to the largest available rendition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Attachment {
    Document {
        file_id: String,
        file_name: Option<String>,
    },
    Photo {
        file_id: String,
        file_unique_id: String,
    },
    Video {
        file_id: String,
        file_name: Option<String>,
    },
    Audio {
        file_id: String,
        file_name: Option<String>,
    },
}

impl Attachment {
    /// Remote handle used to resolve the bytes via the transport.
    pub fn file_id(&self) -> &str {
        match self {
            Attachment::Document { file_id, .. }
            | Attachment::Photo { file_id, .. }
            | Attachment::Video { file_id, .. }
            | Attachment::Audio { file_id, .. } => file_id,
        }
    }

    /// File name to store the attachment under.
    ///
    /// Telegram does not name photos, so those synthesize `<unique_id>.jpg`;
    /// the other kinds fall back to a kind-derived name when the sender's
    /// client omitted one.
    pub fn suggested_name(&self) -> String {
        match self {
            Attachment::Document { file_name, .. } => file_name
                .clone()
                .unwrap_or_else(|| "document.bin".to_string()),
            Attachment::Photo { file_unique_id, .. } => format!("{file_unique_id}.jpg"),
            Attachment::Video { file_name, .. } => {
                file_name.clone().unwrap_or_else(|| "video.mp4".to_string())
            }
            Attachment::Audio { file_name, .. } => {
                file_name.clone().unwrap_or_else(|| "audio.mp3".to_string())
            }
        }
    }

    /// Kind label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Attachment::Document { .. } => "document",
            Attachment::Photo { .. } => "photo",
            Attachment::Video { .. } => "video",
            Attachment::Audio { .. } => "audio",
        }
    }
}

/// A single message as received from Telegram, reduced to the fields the
/// relay consumes. Immutable once built.
#[derive(Clone, Debug)]
pub struct InboundMessage {
    /// Telegram message id, unique within the chat.
    pub id: i64,
    /// Coordinate for sending the status reply.
    pub reply_to: MessageRef,
    /// Numeric id of the sending user, when Telegram reports one.
    pub sender_id: Option<i64>,
    /// Media-group id shared by messages sent together, if any.
    pub group_id: Option<String>,
    /// Caption for media messages, body for plain-text messages.
    pub text: Option<String>,
    pub attachment: Option<Attachment>,
    pub received_at: DateTime<Utc>,
}

impl InboundMessage {
    /// Non-empty text of this message, if any.
    pub fn caption(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }

    /// Synthetic group id for routing an ungrouped file through the same
    /// finalize path. Derived from the message id, so two unrelated single
    /// files can never collide with each other or with a real group id.
    pub fn synthetic_group_id(&self) -> String {
        format!("{}{}", defaults::SINGLE_GROUP_PREFIX, self.id)
    }
}

/// Stored-file descriptor produced by the attachment store and consumed by
/// the note upsert. Field names match what Blinko expects verbatim; never
/// mutated after creation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AttachmentDescriptor {
    pub name: String,
    pub path: String,
    pub size: Option<i64>,
    #[serde(rename = "type")]
    pub content_type: Option<String>,
}
