//! `pibox push` - upload a photo to a gallery server.

use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;

use crate::client::{PushOptions, push_photo};
use crate::constants::API_KEY_ENV;

/// Push one file and print the server's answer.
pub async fn execute(
    file: &Path,
    url: String,
    api_key: Option<String>,
    source: String,
    retries: u32,
    timeout_secs: u64,
) -> Result<()> {
    let mut options = PushOptions::new(url);
    options.api_key = api_key.or_else(|| std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()));
    options.source = source;
    options.timeout = Duration::from_secs(timeout_secs);
    options.retry = options.retry.with_max_retries(retries);

    let receipt = push_photo(file, &options)
        .await
        .with_context(|| format!("Failed to upload {}", file.display()))?;

    println!(
        "Uploaded {} (HTTP {}, {} ms)",
        file.display(),
        receipt.status,
        receipt.elapsed_ms
    );
    println!("{}", serde_json::to_string_pretty(&receipt.body)?);
    Ok(())
}
