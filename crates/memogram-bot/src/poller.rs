//! Long-poll loop feeding Telegram updates into the relay queue.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use memogram_core::defaults;
use memogram_telegram::TelegramClient;

use crate::relay::Event;

/// Poll `getUpdates` forever, converting each message into an inbound event.
///
/// Poll failures are logged and retried after a short backoff; the offset
/// advances past every received update either way, so a malformed or
/// irrelevant update is never re-delivered.
pub async fn poll_updates(client: Arc<TelegramClient>, tx: mpsc::Sender<Event>) {
    let mut offset: Option<i64> = None;
    info!("Update poller started");

    loop {
        match client.get_updates(offset).await {
            Ok(updates) => {
                for update in updates {
                    offset = Some(update.update_id + 1);
                    let Some(message) = update.message else {
                        debug!(update_id = update.update_id, "Skipping non-message update");
                        continue;
                    };
                    if tx.send(Event::Inbound(message.to_inbound())).await.is_err() {
                        info!("Relay queue closed, stopping poller");
                        return;
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "getUpdates failed, backing off");
                tokio::time::sleep(Duration::from_secs(defaults::POLL_ERROR_BACKOFF_SECS)).await;
            }
        }
    }
}
