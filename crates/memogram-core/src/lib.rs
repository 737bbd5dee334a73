//! # memogram-core
//!
//! Core types, traits, and abstractions for memogram.
//!
//! This crate provides the foundational data structures and trait definitions
//! that the transport and backend crates depend on.

pub mod defaults;
pub mod error;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::{Attachment, AttachmentDescriptor, InboundMessage, MessageRef};
pub use traits::{AttachmentStore, ChatTransport, NoteStore};
