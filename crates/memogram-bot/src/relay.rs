//! The serialized relay loop: inbound dispatch plus timer-fire handling.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info};

use memogram_core::{defaults, InboundMessage};

use crate::finalize::Finalizer;
use crate::group::GroupTable;
use crate::scheduler::DebounceScheduler;

/// Everything the relay loop reacts to. Both sources, inbound platform
/// messages and debounce timer fires, funnel through one queue, so group
/// state is only ever touched from one task.
#[derive(Debug)]
pub enum Event {
    Inbound(InboundMessage),
    FinalizeDue { group_id: String, generation: u64 },
}

/// Create the relay event queue.
pub fn channel() -> (mpsc::Sender<Event>, mpsc::Receiver<Event>) {
    mpsc::channel(defaults::EVENT_QUEUE_CAPACITY)
}

/// Owner of the group table and scheduler; the single consumer of the event
/// queue.
///
/// Finalization is spawned off the loop after the record is removed, so a
/// group's slow uploads never hold back other groups' timers or inbound
/// traffic. Once removed, the id is unknown here; a same-id straggler
/// starts a brand-new group.
pub struct Relay {
    authorized_chat_id: i64,
    group_delay: Duration,
    single_delay: Duration,
    table: GroupTable,
    scheduler: DebounceScheduler,
    finalizer: Arc<Finalizer>,
}

impl Relay {
    pub fn new(
        authorized_chat_id: i64,
        group_delay: Duration,
        single_delay: Duration,
        tx: mpsc::Sender<Event>,
        finalizer: Arc<Finalizer>,
    ) -> Self {
        Self {
            authorized_chat_id,
            group_delay,
            single_delay,
            table: GroupTable::new(),
            scheduler: DebounceScheduler::new(tx),
            finalizer,
        }
    }

    /// Run until every sender (poller and all timers) is gone.
    pub async fn run(mut self, mut rx: mpsc::Receiver<Event>) {
        info!("Relay loop started");
        while let Some(event) = rx.recv().await {
            self.handle(event);
        }
        info!("Relay loop stopped");
    }

    fn handle(&mut self, event: Event) {
        match event {
            Event::Inbound(message) => self.dispatch(message),
            Event::FinalizeDue {
                group_id,
                generation,
            } => self.finalize_due(&group_id, generation),
        }
    }

    /// Classify one inbound message and route it.
    fn dispatch(&mut self, message: InboundMessage) {
        if message.sender_id != Some(self.authorized_chat_id) {
            debug!(
                id = message.id,
                sender = ?message.sender_id,
                "Ignoring message from unauthorized sender"
            );
            return;
        }

        if message.attachment.is_some() {
            self.enqueue_file(message);
            return;
        }

        match message.caption() {
            Some(text) if !text.starts_with('/') => {
                // Pure text skips the accumulator entirely.
                let finalizer = self.finalizer.clone();
                let reply_to = message.reply_to;
                let text = text.to_string();
                tokio::spawn(async move {
                    finalizer.save_text(reply_to, &text).await;
                });
            }
            Some(_) => debug!(id = message.id, "Ignoring command message"),
            None => debug!(
                id = message.id,
                "Ignoring message with no text and no recognized attachment"
            ),
        }
    }

    /// Append a file-bearing message to its group and push the group's quiet
    /// window out.
    fn enqueue_file(&mut self, message: InboundMessage) {
        let (group_id, delay) = match &message.group_id {
            Some(id) => (id.clone(), self.group_delay),
            None => (message.synthetic_group_id(), self.single_delay),
        };

        let count = self.table.append(&group_id, message);
        let generation = self.scheduler.reschedule(&group_id, delay);
        debug!(
            group_id = %group_id,
            messages = count,
            generation,
            "Group timer rescheduled"
        );
    }

    /// A quiet window elapsed. Drop stale fires, then hand the record to the
    /// finalizer on its own task.
    fn finalize_due(&mut self, group_id: &str, generation: u64) {
        if !self.scheduler.acknowledge(group_id, generation) {
            debug!(group_id, generation, "Stale finalize timer, ignoring");
            return;
        }

        // Ownership transfers here; the table forgets the id before any
        // network call starts.
        let Some(record) = self.table.remove(group_id) else {
            return;
        };

        let finalizer = self.finalizer.clone();
        let group_id = group_id.to_string();
        tokio::spawn(async move {
            finalizer.finalize(&group_id, record).await;
        });
    }
}
