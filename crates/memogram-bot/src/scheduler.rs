//! Per-group debounce timers.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::trace;

use crate::relay::Event;

/// Outstanding finalize timer for one group. At most one per group id.
struct PendingTimer {
    handle: JoinHandle<()>,
    generation: u64,
}

/// Last-message-wins debounce: every new message for a group cancels the
/// group's previous timer and arms a fresh one.
///
/// Cancellation alone is not enough: a timer may have fired and enqueued
/// its event just before the reschedule. Each schedule therefore carries a
/// generation number, and the relay loop drops fire events whose generation
/// is no longer the newest via [`DebounceScheduler::acknowledge`].
pub struct DebounceScheduler {
    tx: mpsc::Sender<Event>,
    timers: HashMap<String, PendingTimer>,
    next_generation: u64,
}

impl DebounceScheduler {
    pub fn new(tx: mpsc::Sender<Event>) -> Self {
        Self {
            tx,
            timers: HashMap::new(),
            next_generation: 0,
        }
    }

    /// Cancel any previous timer for the group (a no-op when none exists)
    /// and schedule finalization after `delay` of quiet time.
    pub fn reschedule(&mut self, group_id: &str, delay: Duration) -> u64 {
        self.next_generation += 1;
        let generation = self.next_generation;

        let tx = self.tx.clone();
        let id = group_id.to_string();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // A closed queue means the relay loop is gone; nothing to do.
            let _ = tx
                .send(Event::FinalizeDue {
                    group_id: id,
                    generation,
                })
                .await;
        });

        if let Some(previous) = self.timers.insert(
            group_id.to_string(),
            PendingTimer { handle, generation },
        ) {
            trace!(group_id, stale = previous.generation, "Timer cancelled");
            previous.handle.abort();
        }
        generation
    }

    /// Consume a fire event: true (and the timer entry is cleared) only when
    /// `generation` is still the newest schedule for the group.
    pub fn acknowledge(&mut self, group_id: &str, generation: u64) -> bool {
        match self.timers.get(group_id) {
            Some(timer) if timer.generation == generation => {
                self.timers.remove(group_id);
                true
            }
            _ => false,
        }
    }

    /// Number of groups with an armed timer.
    pub fn pending(&self) -> usize {
        self.timers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_only_latest_schedule_fires() {
        let (tx, mut rx) = mpsc::channel(16);
        let mut scheduler = DebounceScheduler::new(tx);

        scheduler.reschedule("G1", Duration::from_millis(100));
        let second = scheduler.reschedule("G1", Duration::from_millis(100));
        assert_eq!(scheduler.pending(), 1);

        tokio::time::sleep(Duration::from_millis(300)).await;

        match rx.recv().await {
            Some(Event::FinalizeDue {
                group_id,
                generation,
            }) => {
                assert_eq!(group_id, "G1");
                assert_eq!(generation, second);
            }
            other => panic!("expected FinalizeDue, got {other:?}"),
        }
        // The first schedule was aborted mid-sleep; nothing else arrives.
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_acknowledge_accepts_only_newest_generation() {
        let (tx, _rx) = mpsc::channel(16);
        let mut scheduler = DebounceScheduler::new(tx);

        let first = scheduler.reschedule("G1", Duration::from_secs(5));
        let second = scheduler.reschedule("G1", Duration::from_secs(5));

        assert!(!scheduler.acknowledge("G1", first));
        assert!(scheduler.acknowledge("G1", second));
        // The entry is consumed with the acknowledgement.
        assert!(!scheduler.acknowledge("G1", second));
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_groups_time_out_independently() {
        let (tx, mut rx) = mpsc::channel(16);
        let mut scheduler = DebounceScheduler::new(tx);

        scheduler.reschedule("G1", Duration::from_millis(100));
        scheduler.reschedule("G2", Duration::from_millis(200));
        assert_eq!(scheduler.pending(), 2);

        tokio::time::sleep(Duration::from_millis(300)).await;

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        match (first, second) {
            (
                Event::FinalizeDue { group_id: a, .. },
                Event::FinalizeDue { group_id: b, .. },
            ) => {
                assert_eq!(a, "G1");
                assert_eq!(b, "G2");
            }
            other => panic!("expected two FinalizeDue events, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_acknowledge_unknown_group_is_noop() {
        let (tx, _rx) = mpsc::channel(16);
        let mut scheduler = DebounceScheduler::new(tx);
        assert!(!scheduler.acknowledge("nope", 1));
    }
}
