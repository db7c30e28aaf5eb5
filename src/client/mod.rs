//! Push client: submit a photo to a running gallery server.
//!
//! Sends the same request a booth does: multipart field `photo`
//! (`image/jpeg`), `timestamp` and `source` text fields, and the shared
//! secret in `X-API-Key`. Connection problems, timeouts, 5xx, 408 and 429
//! are retried with exponential backoff; other 4xx answers are final.

pub mod retry;

use chrono::{Local, SecondsFormat};
use reqwest::multipart::{Form, Part};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::constants::{API_KEY_HEADER, PHOTO_FIELD, SOURCE_FIELD, TIMESTAMP_FIELD};
use retry::{RetryConfig, retry_async};

/// Longest server error body kept in a [`PushError::Status`].
const MAX_ERROR_BODY: usize = 200;

/// Where and how to push.
#[derive(Debug, Clone)]
pub struct PushOptions {
    /// Full upload endpoint, e.g. `http://gallery.local:8080/upload`
    pub url: String,
    pub api_key: Option<String>,
    /// Value of the `source` field
    pub source: String,
    /// Per-attempt request timeout
    pub timeout: Duration,
    pub retry: RetryConfig,
}

impl PushOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: None,
            source: "pibox".to_string(),
            timeout: Duration::from_secs(30),
            retry: RetryConfig::default(),
        }
    }
}

/// Outcome of a successful push.
#[derive(Debug, Clone)]
pub struct UploadReceipt {
    pub status: u16,
    /// Parsed JSON body, or `{"raw": "..."}` when the server did not send JSON
    pub body: serde_json::Value,
    /// Time spent across all attempts
    pub elapsed_ms: u64,
}

/// Push failures.
#[derive(Debug, thiserror::Error)]
pub enum PushError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

impl PushError {
    /// Whether another attempt could succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Read { .. } => false,
            Self::Request(e) => e.is_timeout() || e.is_connect(),
            Self::Status { status, .. } => *status >= 500 || *status == 408 || *status == 429,
        }
    }
}

/// Upload the file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, or the last attempt failed.
pub async fn push_photo(path: &Path, options: &PushOptions) -> Result<UploadReceipt, PushError> {
    let data = tokio::fs::read(path).await.map_err(|source| PushError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let filename = path
        .file_name()
        .map_or_else(|| "photo.jpg".to_string(), |n| n.to_string_lossy().into_owned());
    let timestamp = Local::now().to_rfc3339_opts(SecondsFormat::Secs, false);
    let client = reqwest::Client::builder().timeout(options.timeout).build()?;

    let started = Instant::now();
    let mut receipt = retry_async(
        &options.retry,
        || send_once(&client, options, &data, &filename, &timestamp),
        PushError::is_transient,
    )
    .await?;
    receipt.elapsed_ms = started.elapsed().as_millis() as u64;

    info!(
        %filename,
        status = receipt.status,
        elapsed_ms = receipt.elapsed_ms,
        "Upload successful"
    );
    Ok(receipt)
}

async fn send_once(
    client: &reqwest::Client,
    options: &PushOptions,
    data: &[u8],
    filename: &str,
    timestamp: &str,
) -> Result<UploadReceipt, PushError> {
    let part = Part::bytes(data.to_vec())
        .file_name(filename.to_string())
        .mime_str("image/jpeg")?;
    let form = Form::new()
        .part(PHOTO_FIELD, part)
        .text(TIMESTAMP_FIELD, timestamp.to_string())
        .text(SOURCE_FIELD, options.source.clone());

    let mut request = client.post(&options.url).multipart(form);
    if let Some(key) = &options.api_key {
        request = request.header(API_KEY_HEADER, key);
    }

    debug!(url = %options.url, %filename, bytes = data.len(), "Sending upload");
    let response = request.send().await?;
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        return Err(PushError::Status {
            status: status.as_u16(),
            body: truncate(&text, MAX_ERROR_BODY),
        });
    }

    let body = serde_json::from_str(&text)
        .unwrap_or_else(|_| serde_json::json!({ "raw": truncate(&text, MAX_ERROR_BODY) }));
    Ok(UploadReceipt {
        status: status.as_u16(),
        body,
        elapsed_ms: 0,
    })
}

fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}
