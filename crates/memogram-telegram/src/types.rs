//! Wire types for the slice of the Telegram Bot API memogram consumes.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use memogram_core::{Attachment, InboundMessage, MessageRef};

/// Envelope every Bot API method wraps its result in.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

/// One entry from `getUpdates`.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub file_id: String,
    pub file_name: Option<String>,
}

/// One rendition of a photo. Telegram sends several sizes per photo message.
#[derive(Debug, Clone, Deserialize)]
pub struct PhotoSize {
    pub file_id: String,
    pub file_unique_id: String,
    pub width: i64,
    pub height: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    pub file_id: String,
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Audio {
    pub file_id: String,
    pub file_name: Option<String>,
}

/// Result of `getFile`: the server-side path used to download the bytes.
#[derive(Debug, Clone, Deserialize)]
pub struct FileInfo {
    pub file_id: String,
    pub file_path: Option<String>,
}

/// An inbound Telegram message, as delivered inside an [`Update`].
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    /// Unix timestamp the message was sent at.
    pub date: i64,
    pub text: Option<String>,
    pub caption: Option<String>,
    pub media_group_id: Option<String>,
    pub document: Option<Document>,
    #[serde(default)]
    pub photo: Vec<PhotoSize>,
    pub video: Option<Video>,
    pub audio: Option<Audio>,
}

impl Message {
    /// The recognized file payload of this message, if any.
    ///
    /// Photos resolve to the largest rendition Telegram offers. Messages
    /// carrying other media kinds (stickers, voice notes, ...) yield `None`
    /// and are ignored upstream.
    pub fn attachment(&self) -> Option<Attachment> {
        if let Some(doc) = &self.document {
            return Some(Attachment::Document {
                file_id: doc.file_id.clone(),
                file_name: doc.file_name.clone(),
            });
        }
        if let Some(best) = self.photo.iter().max_by_key(|p| p.width * p.height) {
            return Some(Attachment::Photo {
                file_id: best.file_id.clone(),
                file_unique_id: best.file_unique_id.clone(),
            });
        }
        if let Some(video) = &self.video {
            return Some(Attachment::Video {
                file_id: video.file_id.clone(),
                file_name: video.file_name.clone(),
            });
        }
        if let Some(audio) = &self.audio {
            return Some(Attachment::Audio {
                file_id: audio.file_id.clone(),
                file_name: audio.file_name.clone(),
            });
        }
        None
    }

    /// Reduce the raw message to the domain model the relay consumes.
    pub fn to_inbound(&self) -> InboundMessage {
        InboundMessage {
            id: self.message_id,
            reply_to: MessageRef {
                chat_id: self.chat.id,
                message_id: self.message_id,
            },
            sender_id: self.from.as_ref().map(|u| u.id),
            group_id: self.media_group_id.clone(),
            text: self.caption.clone().or_else(|| self.text.clone()),
            attachment: self.attachment(),
            received_at: DateTime::<Utc>::from_timestamp(self.date, 0).unwrap_or_else(Utc::now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo_message_json() -> &'static str {
        r#"{
            "message_id": 10,
            "from": {"id": 42, "is_bot": false, "first_name": "A"},
            "chat": {"id": 7, "type": "private"},
            "date": 1722470400,
            "caption": "puppy",
            "media_group_id": "13537887821213",
            "photo": [
                {"file_id": "small", "file_unique_id": "u-small", "width": 90, "height": 60},
                {"file_id": "large", "file_unique_id": "u-large", "width": 1280, "height": 853},
                {"file_id": "medium", "file_unique_id": "u-medium", "width": 320, "height": 213}
            ]
        }"#
    }

    #[test]
    fn test_photo_message_picks_largest_rendition() {
        let message: Message = serde_json::from_str(photo_message_json()).unwrap();
        match message.attachment() {
            Some(Attachment::Photo { file_id, .. }) => assert_eq!(file_id, "large"),
            other => panic!("expected photo attachment, got {other:?}"),
        }
    }

    #[test]
    fn test_photo_message_to_inbound() {
        let message: Message = serde_json::from_str(photo_message_json()).unwrap();
        let inbound = message.to_inbound();
        assert_eq!(inbound.id, 10);
        assert_eq!(inbound.sender_id, Some(42));
        assert_eq!(inbound.group_id.as_deref(), Some("13537887821213"));
        assert_eq!(inbound.text.as_deref(), Some("puppy"));
        assert_eq!(inbound.reply_to.chat_id, 7);
        assert_eq!(inbound.reply_to.message_id, 10);
    }

    #[test]
    fn test_text_message_has_no_attachment() {
        let json = r#"{
            "message_id": 11,
            "chat": {"id": 7, "type": "private"},
            "date": 1722470400,
            "text": "buy milk"
        }"#;
        let message: Message = serde_json::from_str(json).unwrap();
        assert!(message.attachment().is_none());
        let inbound = message.to_inbound();
        assert_eq!(inbound.text.as_deref(), Some("buy milk"));
        assert!(inbound.sender_id.is_none());
        assert!(inbound.group_id.is_none());
    }

    #[test]
    fn test_document_takes_precedence_and_keeps_name() {
        let json = r#"{
            "message_id": 12,
            "chat": {"id": 7, "type": "private"},
            "date": 1722470400,
            "document": {"file_id": "doc-1", "file_name": "notes.pdf", "mime_type": "application/pdf"}
        }"#;
        let message: Message = serde_json::from_str(json).unwrap();
        match message.attachment() {
            Some(Attachment::Document { file_id, file_name }) => {
                assert_eq!(file_id, "doc-1");
                assert_eq!(file_name.as_deref(), Some("notes.pdf"));
            }
            other => panic!("expected document attachment, got {other:?}"),
        }
    }

    #[test]
    fn test_unrecognized_media_yields_none() {
        // A sticker message carries none of the four recognized kinds.
        let json = r#"{
            "message_id": 13,
            "chat": {"id": 7, "type": "private"},
            "date": 1722470400
        }"#;
        let message: Message = serde_json::from_str(json).unwrap();
        assert!(message.attachment().is_none());
        assert!(message.to_inbound().text.is_none());
    }

    #[test]
    fn test_envelope_deserializes_failure_shape() {
        let json = r#"{"ok": false, "description": "Unauthorized"}"#;
        let envelope: ApiEnvelope<Vec<Update>> = serde_json::from_str(json).unwrap();
        assert!(!envelope.ok);
        assert!(envelope.result.is_none());
        assert_eq!(envelope.description.as_deref(), Some("Unauthorized"));
    }

    #[test]
    fn test_update_with_non_message_payload() {
        // Edited messages, callbacks etc. arrive with `message` absent.
        let json = r#"{"update_id": 5}"#;
        let update: Update = serde_json::from_str(json).unwrap();
        assert!(update.message.is_none());
    }
}
