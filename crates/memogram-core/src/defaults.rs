//! Centralized default constants for memogram.
//!
//! **This module is the single source of truth** for all shared default
//! values. The other crates reference these constants instead of defining
//! their own magic numbers.

// =============================================================================
// DEBOUNCE
// =============================================================================

/// Quiet window after the last message of a media group before the group is
/// finalized. Telegram delivers grouped files as a rapid burst of independent
/// updates with no group-complete marker; silence is the only end signal.
pub const GROUP_DEBOUNCE_MS: u64 = 1500;

/// Quiet window for a synthetic one-off group (a single ungrouped file).
/// Kept near zero so solitary messages are not perceived as slow.
pub const SINGLE_DEBOUNCE_MS: u64 = 100;

/// Prefix for synthetic one-off group ids. Telegram media-group ids are
/// numeric strings, so the prefix can never collide with a real id.
pub const SINGLE_GROUP_PREFIX: &str = "single_";

// =============================================================================
// HTTP
// =============================================================================

/// TCP connect timeout for both backends (seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Telegram long-poll window for getUpdates (seconds).
pub const LONG_POLL_TIMEOUT_SECS: u64 = 60;

/// Read timeout for everything except the long poll (seconds).
pub const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Upload timeout for a single attachment (seconds). Large videos over slow
/// links need more headroom than ordinary API calls.
pub const UPLOAD_TIMEOUT_SECS: u64 = 300;

/// Backoff after a failed getUpdates poll before retrying (seconds).
pub const POLL_ERROR_BACKOFF_SECS: u64 = 2;

// =============================================================================
// EVENT LOOP
// =============================================================================

/// Capacity of the serialized event queue feeding the relay loop.
pub const EVENT_QUEUE_CAPACITY: usize = 256;

// =============================================================================
// ENVIRONMENT VARIABLES
// =============================================================================

/// Telegram bot credential (required).
pub const ENV_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";

/// Numeric id of the only sender the bot accepts messages from (required).
pub const ENV_AUTHORIZED_CHAT_ID: &str = "AUTHORIZED_CHAT_ID";

/// Base URL of the Blinko instance (required).
pub const ENV_BLINKO_API_URL: &str = "BLINKO_API_URL";

/// Blinko API key, sent as a bearer token (required).
pub const ENV_BLINKO_API_KEY: &str = "BLINKO_API_KEY";

/// Override for [`GROUP_DEBOUNCE_MS`] (optional).
pub const ENV_GROUP_DEBOUNCE_MS: &str = "GROUP_DEBOUNCE_MS";

/// Override for [`SINGLE_DEBOUNCE_MS`] (optional).
pub const ENV_SINGLE_DEBOUNCE_MS: &str = "SINGLE_DEBOUNCE_MS";
