//! memogram - Telegram to Blinko relay bot.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use memogram_blinko::BlinkoClient;
use memogram_bot::{channel, poller, Config, Finalizer, Relay};
use memogram_telegram::TelegramClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with configurable output
    //
    // Environment variables:
    //   LOG_FORMAT  - "json" or "text" (default: "text")
    //   LOG_FILE    - path to log file (optional, enables file logging)
    //   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected by default)
    //   RUST_LOG    - standard env filter (default: "memogram=debug")
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "memogram=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    // Optionally create a file appender with daily rotation
    let _file_guard = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("memogram.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer().with_writer(non_blocking);
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            } else {
                layer = layer.with_ansi(false); // no ANSI in files
            }
            registry.with(layer).init();
        }
        Some(guard)
    } else {
        // Console-only output
        if log_format == "json" {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer();
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
        None
    };

    let config = Config::from_env()?;
    info!(
        chat_id = config.authorized_chat_id,
        backend = %config.blinko_api_url,
        group_delay_ms = config.group_delay.as_millis() as u64,
        single_delay_ms = config.single_delay.as_millis() as u64,
        "Configuration loaded"
    );

    let telegram = Arc::new(TelegramClient::new(&config.bot_token)?);
    let blinko = Arc::new(BlinkoClient::new(
        &config.blinko_api_url,
        &config.blinko_api_key,
    )?);

    let finalizer = Arc::new(Finalizer::new(
        telegram.clone(),
        blinko.clone(),
        blinko.clone(),
    ));

    let (tx, rx) = channel();
    let relay = Relay::new(
        config.authorized_chat_id,
        config.group_delay,
        config.single_delay,
        tx.clone(),
        finalizer,
    );
    let poller_task = tokio::spawn(poller::poll_updates(telegram, tx));

    info!("Bot started, polling for updates");

    tokio::select! {
        _ = relay.run(rx) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    poller_task.abort();
    Ok(())
}
