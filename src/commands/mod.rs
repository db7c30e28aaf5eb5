//! CLI command implementations for pibox.
//!
//! - [`serve`] - Run the gallery server
//! - [`check_config`] - Validate a config file without starting
//! - [`push`] - Upload a photo to a running server

pub mod check_config;
pub mod push;
pub mod serve;

use anyhow::Result;
use std::path::Path;
use tracing::warn;

use crate::config::Config;

/// Load, apply environment overrides, and validate.
///
/// A missing file falls back to defaults so `PIBOX_API_KEY` alone is enough
/// to start. Warnings are logged; errors abort.
pub fn load_config(path: &Path) -> Result<Config> {
    let mut config = Config::load_or_default(path)?;
    config.apply_env();

    let result = config.validate()?;
    for warning in &result.warnings {
        warn!("{warning}");
    }
    Ok(config)
}
