//! # memogram-bot
//!
//! The relay itself: configuration, inbound dispatch, media-group
//! accumulation, per-group debounce timers, and group finalization.
//!
//! Telegram delivers a media group as a burst of independent updates with no
//! group-complete marker. The relay funnels inbound messages and timer-fire
//! events through one serialized queue; a quiet window after the last
//! message of a group is the signal to drain it, upload every attachment,
//! and write a single Blinko note.

pub mod config;
pub mod finalize;
pub mod group;
pub mod poller;
pub mod relay;
pub mod scheduler;
pub mod status;

pub use config::Config;
pub use finalize::Finalizer;
pub use group::{GroupRecord, GroupTable};
pub use relay::{channel, Event, Relay};
pub use scheduler::DebounceScheduler;
