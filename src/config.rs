//! Configuration for the pibox gallery server.
//!
//! Loaded once at startup from `pibox.toml` and shared read-only with every
//! handler as `Arc<Config>`. Sections:
//!
//! - [`ServerConfig`] - bind address
//! - [`UploadConfig`] - shared secret, size limit, allowed types
//! - [`StoreConfig`] - photo directory and its URL prefix
//! - [`GalleryConfig`] - page title and listing access
//!
//! Every field has a default except `upload.api_key`, which must be set in
//! the file or through `PIBOX_API_KEY`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants;
use crate::store::ImageKind;

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Non-fatal warnings that should be logged but don't prevent operation.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Returns true if there are any warnings.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// pibox.toml configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    pub upload: UploadConfig,
    pub store: StoreConfig,
    pub gallery: GalleryConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: constants::DEFAULT_HOST.to_string(),
            port: constants::DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UploadConfig {
    /// Shared secret expected in the `X-API-Key` header.
    pub api_key: String,
    /// Maximum accepted photo size in bytes.
    pub max_file_size: u64,
    /// MIME types accepted after sniffing.
    pub allowed_types: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            max_file_size: constants::DEFAULT_MAX_FILE_SIZE,
            allowed_types: vec![ImageKind::Jpeg.mime().to_string()],
        }
    }
}

impl UploadConfig {
    /// Allowed types that map to a known [`ImageKind`], in configured order.
    #[must_use]
    pub fn allowed_kinds(&self) -> Vec<ImageKind> {
        let mut kinds = Vec::new();
        for kind in self.allowed_types.iter().filter_map(|t| ImageKind::from_mime(t)) {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        kinds
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Directory holding stored photos.
    pub dir: PathBuf,
    /// Path segment photos are served under (`<url_prefix>/<filename>`).
    pub url_prefix: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(constants::DEFAULT_STORE_DIR),
            url_prefix: constants::DEFAULT_URL_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    pub title: String,
    /// Declared for the booth UI; the listing always returns every photo.
    pub page_size: usize,
    /// Require `X-API-Key` on the JSON listing as well as on intake.
    pub require_key_for_listing: bool,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            title: constants::DEFAULT_TITLE.to_string(),
            page_size: constants::DEFAULT_PAGE_SIZE,
            require_key_for_listing: false,
        }
    }
}

impl Config {
    /// Load configuration from the specified path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read (IO error)
    /// - The file contains invalid TOML syntax
    /// - A field has the wrong type or is unknown
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load configuration, falling back to defaults when the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load_from(path)
        } else {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply environment overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Apply environment overrides using `lookup` to read variables.
    ///
    /// `PIBOX_API_KEY` replaces `upload.api_key` when set and non-empty.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(constants::API_KEY_ENV)
            && !key.is_empty()
        {
            self.upload.api_key = key;
        }
    }

    /// Validate configuration with comprehensive checks.
    ///
    /// Returns a `ValidationResult` containing any non-fatal warnings.
    ///
    /// # Errors
    ///
    /// Returns an error listing every problem found:
    /// - Empty API key
    /// - Port 0
    /// - Zero `max_file_size`
    /// - Empty or unknown `allowed_types`
    /// - Invalid `url_prefix`
    /// - Store path that exists but is not a directory
    pub fn validate(&self) -> Result<ValidationResult> {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        // 1. Server
        if self.server.port == 0 {
            errors.push(
                "server.port cannot be 0. Use a valid port number (1-65535)\n  \
                 Common ports: 8080 (default), 8000, 3000"
                    .to_string(),
            );
        } else if self.server.port < 1024 {
            warnings.push(format!(
                "server.port {} is a system/privileged port (< 1024)\n  \
                 Recommendation: Use ports >= 1024 (e.g., 8080) to avoid permission issues",
                self.server.port
            ));
        }

        // 2. Upload
        if self.upload.api_key.is_empty() {
            errors.push(format!(
                "upload.api_key cannot be empty\n  \
                 Set it in the config file or via {}",
                constants::API_KEY_ENV
            ));
        } else if self.upload.api_key.len() < constants::MIN_RECOMMENDED_KEY_LEN {
            warnings.push(format!(
                "upload.api_key is shorter than {} characters\n  \
                 Recommendation: use a long random secret",
                constants::MIN_RECOMMENDED_KEY_LEN
            ));
        }

        if self.upload.max_file_size == 0 {
            errors.push(
                "upload.max_file_size cannot be 0 (default: 10485760 = 10 MiB)".to_string(),
            );
        } else if self.upload.max_file_size > constants::LARGE_FILE_SIZE_WARNING {
            warnings.push(format!(
                "upload.max_file_size {} is very high (> 100 MiB)\n  \
                 Uploads are buffered in memory before being written",
                self.upload.max_file_size
            ));
        }

        if self.upload.allowed_types.is_empty() {
            errors.push("upload.allowed_types cannot be empty".to_string());
        }
        for mime in &self.upload.allowed_types {
            if ImageKind::from_mime(mime).is_none() {
                let known: Vec<&str> = ImageKind::ALL.iter().map(|k| k.mime()).collect();
                errors.push(format!(
                    "Unknown upload type '{mime}'. Supported types: {}",
                    known.join(", ")
                ));
            }
        }

        // 3. Store
        let prefix = &self.store.url_prefix;
        if prefix.is_empty()
            || prefix.contains(['/', '\\'])
            || prefix == ".."
            || prefix == "."
            || prefix == "api"
        {
            errors.push(format!(
                "store.url_prefix must be a single path segment (got: '{prefix}')"
            ));
        }

        if self.store.dir.exists() && !self.store.dir.is_dir() {
            errors.push(format!(
                "store.dir is not a directory: {}",
                self.store.dir.display()
            ));
        }

        if !errors.is_empty() {
            anyhow::bail!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            );
        }

        Ok(ValidationResult { warnings })
    }
}
