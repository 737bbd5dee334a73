//! Telegram Bot API client.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use memogram_core::defaults;
use memogram_core::{Attachment, ChatTransport, Error, MessageRef, Result};

use crate::types::{ApiEnvelope, FileInfo, Message, Update};

/// Default Bot API host.
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Client for the Telegram Bot API.
pub struct TelegramClient {
    client: Client,
    base_url: String,
    token: String,
}

#[derive(Serialize)]
struct GetUpdatesParams {
    timeout: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<i64>,
}

#[derive(Serialize)]
struct SendMessageParams<'a> {
    chat_id: i64,
    text: &'a str,
    reply_to_message_id: i64,
}

#[derive(Serialize)]
struct EditMessageTextParams<'a> {
    chat_id: i64,
    message_id: i64,
    text: &'a str,
}

#[derive(Serialize)]
struct GetFileParams<'a> {
    file_id: &'a str,
}

impl TelegramClient {
    /// Create a client against the production Bot API host.
    pub fn new(token: &str) -> Result<Self> {
        Self::with_base_url(token, DEFAULT_API_BASE)
    }

    /// Create a client against a custom host (tests point this at a mock
    /// server).
    pub fn with_base_url(token: &str, base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(defaults::CONNECT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }

    /// POST a Bot API method and unwrap the `{ok, result, description}`
    /// envelope.
    async fn call<T, P>(&self, method: &str, params: &P, timeout: Duration) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize,
    {
        let response = self
            .client
            .post(self.method_url(method))
            .json(params)
            .timeout(timeout)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        // Telegram reports API-level failures as {ok:false, description}
        // with a non-2xx status; prefer that description when present.
        let envelope: ApiEnvelope<T> = serde_json::from_str(&body).map_err(|e| {
            if status.is_success() {
                Error::MalformedResponse(format!("{method} response not JSON: {e}"))
            } else {
                Error::Request(format!("{method} returned {status}: {body}"))
            }
        })?;

        if !envelope.ok {
            return Err(Error::Telegram(envelope.description.unwrap_or_else(|| {
                format!("{method} failed with no description")
            })));
        }
        envelope
            .result
            .ok_or_else(|| Error::MalformedResponse(format!("{method} response missing result")))
    }

    /// Long-poll for new updates. Blocks up to the poll window when the
    /// queue is empty; `offset` must be one past the last seen update id.
    pub async fn get_updates(&self, offset: Option<i64>) -> Result<Vec<Update>> {
        let params = GetUpdatesParams {
            timeout: defaults::LONG_POLL_TIMEOUT_SECS,
            offset,
        };
        // The request deadline must outlive the server-side poll window.
        let timeout = Duration::from_secs(defaults::LONG_POLL_TIMEOUT_SECS + 10);
        self.call("getUpdates", &params, timeout).await
    }

    async fn get_file(&self, file_id: &str) -> Result<FileInfo> {
        self.call(
            "getFile",
            &GetFileParams { file_id },
            Duration::from_secs(defaults::REQUEST_TIMEOUT_SECS),
        )
        .await
    }
}

#[async_trait]
impl ChatTransport for TelegramClient {
    async fn download_attachment(&self, attachment: &Attachment, dest: &Path) -> Result<()> {
        let info = self.get_file(attachment.file_id()).await?;
        let file_path = info.file_path.ok_or_else(|| {
            Error::MalformedResponse(format!(
                "getFile for {} returned no file_path",
                attachment.file_id()
            ))
        })?;

        let url = format!("{}/file/bot{}/{}", self.base_url, self.token, file_path);
        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(defaults::UPLOAD_TIMEOUT_SECS))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Request(format!(
                "file download returned {}",
                response.status()
            )));
        }

        let bytes = response.bytes().await?;
        debug!(
            kind = attachment.kind(),
            bytes = bytes.len(),
            dest = %dest.display(),
            "Attachment downloaded"
        );
        tokio::fs::write(dest, &bytes).await?;
        Ok(())
    }

    async fn send_reply(&self, to: MessageRef, text: &str) -> Result<MessageRef> {
        let params = SendMessageParams {
            chat_id: to.chat_id,
            text,
            reply_to_message_id: to.message_id,
        };
        let message: Message = self
            .call(
                "sendMessage",
                &params,
                Duration::from_secs(defaults::REQUEST_TIMEOUT_SECS),
            )
            .await?;
        Ok(MessageRef {
            chat_id: message.chat.id,
            message_id: message.message_id,
        })
    }

    async fn edit_message(&self, message: MessageRef, text: &str) -> Result<()> {
        let params = EditMessageTextParams {
            chat_id: message.chat_id,
            message_id: message.message_id,
            text,
        };
        // The result is the edited message; nothing in it is needed.
        let _: serde_json::Value = self
            .call(
                "editMessageText",
                &params,
                Duration::from_secs(defaults::REQUEST_TIMEOUT_SECS),
            )
            .await?;
        Ok(())
    }
}
