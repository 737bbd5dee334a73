//! In-memory accumulation of media-group messages.

use std::collections::HashMap;

use memogram_core::{InboundMessage, MessageRef};

/// Messages seen so far for one media group, in arrival order.
///
/// Owned exclusively by the [`GroupTable`] until finalization removes it;
/// from that point the record belongs to the finalizer and the table treats
/// the id as unknown.
#[derive(Debug)]
pub struct GroupRecord {
    /// Append-only until the record is drained.
    pub messages: Vec<InboundMessage>,
    /// Target for the single status reply, taken from the first message.
    pub reply_to: MessageRef,
}

/// Table of live media groups, keyed by group id.
///
/// Not locked: all mutation happens on the relay loop task, and append for a
/// given id always happens-before the corresponding remove.
#[derive(Debug, Default)]
pub struct GroupTable {
    groups: HashMap<String, GroupRecord>,
}

impl GroupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to the group, creating the record on first sight.
    /// The first message's reply target sticks for the whole group. Returns
    /// the number of messages accumulated so far.
    pub fn append(&mut self, group_id: &str, message: InboundMessage) -> usize {
        let record = self
            .groups
            .entry(group_id.to_string())
            .or_insert_with(|| GroupRecord {
                messages: Vec::new(),
                reply_to: message.reply_to,
            });
        record.messages.push(message);
        record.messages.len()
    }

    /// Remove and return the record, transferring ownership to the caller.
    /// Absent id means the group was already finalized.
    pub fn remove(&mut self, group_id: &str) -> Option<GroupRecord> {
        self.groups.remove(group_id)
    }

    pub fn contains(&self, group_id: &str) -> bool {
        self.groups.contains_key(group_id)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
