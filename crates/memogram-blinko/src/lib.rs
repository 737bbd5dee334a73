//! # memogram-blinko
//!
//! Blinko backend client for memogram.
//!
//! Implements the [`memogram_core::AttachmentStore`] and
//! [`memogram_core::NoteStore`] seams on top of Blinko's HTTP API:
//! multipart file upload and JSON note upsert, both bearer-authenticated.

pub mod client;

pub use client::BlinkoClient;
