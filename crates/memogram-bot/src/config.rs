//! Runtime configuration from environment variables.

use std::time::Duration;

use memogram_core::defaults;
use memogram_core::{Error, Result};

/// Startup configuration. All four credentials are required; the relay
/// refuses to start partially configured.
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub authorized_chat_id: i64,
    pub blinko_api_url: String,
    pub blinko_api_key: String,
    /// Quiet window for real media groups.
    pub group_delay: Duration,
    /// Quiet window for synthetic one-off groups.
    pub single_delay: Duration,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// | Variable | Required | Default |
    /// |----------|----------|---------|
    /// | `TELEGRAM_BOT_TOKEN` | yes | (none) |
    /// | `AUTHORIZED_CHAT_ID` | yes | (none) |
    /// | `BLINKO_API_URL` | yes | (none) |
    /// | `BLINKO_API_KEY` | yes | (none) |
    /// | `GROUP_DEBOUNCE_MS` | no | 1500 |
    /// | `SINGLE_DEBOUNCE_MS` | no | 100 |
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bot_token = required(&lookup, defaults::ENV_BOT_TOKEN)?;
        let blinko_api_url = required(&lookup, defaults::ENV_BLINKO_API_URL)?;
        let blinko_api_key = required(&lookup, defaults::ENV_BLINKO_API_KEY)?;

        let authorized_chat_id = required(&lookup, defaults::ENV_AUTHORIZED_CHAT_ID)?
            .parse::<i64>()
            .map_err(|_| {
                Error::Config(format!(
                    "{} must be a numeric chat id",
                    defaults::ENV_AUTHORIZED_CHAT_ID
                ))
            })?;

        let group_delay = delay_ms(
            &lookup,
            defaults::ENV_GROUP_DEBOUNCE_MS,
            defaults::GROUP_DEBOUNCE_MS,
        );
        let single_delay = delay_ms(
            &lookup,
            defaults::ENV_SINGLE_DEBOUNCE_MS,
            defaults::SINGLE_DEBOUNCE_MS,
        );

        Ok(Self {
            bot_token,
            authorized_chat_id,
            blinko_api_url,
            blinko_api_key,
            group_delay,
            single_delay,
        })
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<String> {
    lookup(name)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| Error::Config(format!("{name} is not set")))
}

fn delay_ms(lookup: &impl Fn(&str) -> Option<String>, name: &str, default_ms: u64) -> Duration {
    let ms = lookup(name)
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(default_ms);
    Duration::from_millis(ms)
}
