//! Blinko HTTP client: attachment upload and note upsert.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use memogram_core::defaults;
use memogram_core::{AttachmentDescriptor, AttachmentStore, Error, NoteStore, Result};

/// Client for a Blinko instance.
///
/// One attempt per call; failures are returned to the caller, never retried
/// here.
pub struct BlinkoClient {
    client: Client,
    base_url: String,
    api_key: String,
}

/// Shape of a successful `/api/file/upload` response. Everything is optional
/// at the parse layer; `fileName` and `filePath` are validated afterwards so
/// a 2xx body missing them surfaces as [`Error::MalformedResponse`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    file_name: Option<String>,
    file_path: Option<String>,
    size: Option<i64>,
    #[serde(rename = "type")]
    content_type: Option<String>,
}

/// Body of `/api/v1/note/upsert`. `type: 0` is Blinko's plain-note kind.
#[derive(Debug, Serialize)]
struct NotePayload<'a> {
    content: &'a str,
    #[serde(rename = "type")]
    note_type: i32,
    attachments: &'a [AttachmentDescriptor],
}

impl BlinkoClient {
    /// Create a client for the given instance. Trailing slashes on the base
    /// URL are tolerated.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(defaults::CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(defaults::REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl AttachmentStore for BlinkoClient {
    async fn upload_file(&self, path: &Path, file_name: &str) -> Result<AttachmentDescriptor> {
        let url = self.endpoint("/api/file/upload");
        let bytes = tokio::fs::read(path).await?;
        let byte_count = bytes.len();

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        debug!(file = %file_name, bytes = byte_count, "Uploading attachment");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .timeout(Duration::from_secs(defaults::UPLOAD_TIMEOUT_SECS))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Request(format!(
                "upload of {file_name} returned {status}: {body}"
            )));
        }

        let body = response.text().await?;
        let parsed: UploadResponse = serde_json::from_str(&body)
            .map_err(|e| Error::MalformedResponse(format!("upload response not JSON: {e}")))?;

        match (parsed.file_name, parsed.file_path) {
            (Some(name), Some(file_path)) => {
                info!(file = %name, path = %file_path, "Attachment uploaded");
                Ok(AttachmentDescriptor {
                    name,
                    path: file_path,
                    size: parsed.size,
                    content_type: parsed.content_type,
                })
            }
            _ => Err(Error::MalformedResponse(format!(
                "upload response missing fileName/filePath: {body}"
            ))),
        }
    }
}

#[async_trait]
impl NoteStore for BlinkoClient {
    async fn create_note(
        &self,
        content: &str,
        attachments: Vec<AttachmentDescriptor>,
    ) -> Result<()> {
        let url = self.endpoint("/api/v1/note/upsert");
        let payload = NotePayload {
            content,
            note_type: 0,
            attachments: &attachments,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Request(format!(
                "note upsert returned {status}: {body}"
            )));
        }

        info!(attachments = attachments.len(), "Note created");
        Ok(())
    }
}
