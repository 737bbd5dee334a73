//! # memogram-telegram
//!
//! Telegram Bot API client for memogram.
//!
//! Typed models for the slice of the Bot API the relay consumes, a long-poll
//! `getUpdates` loop primitive, attachment retrieval via `getFile`, and the
//! reply/edit calls backing the status message. Implements the
//! [`memogram_core::ChatTransport`] seam.

pub mod client;
pub mod types;

pub use client::TelegramClient;
pub use types::{ApiEnvelope, Chat, Document, FileInfo, Message, PhotoSize, Update, User};
