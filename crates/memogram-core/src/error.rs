//! Error types for memogram.

use thiserror::Error;

/// Result type alias using memogram's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for memogram operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid configuration (fatal at startup)
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Backend answered 2xx but the body lacked expected fields
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Telegram Bot API returned ok=false
    #[error("Telegram API error: {0}")]
    Telegram(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}
