//! `pibox check-config` - validate configuration and exit.

use anyhow::Result;
use std::path::Path;

use crate::config::Config;

/// Print a summary of the effective configuration and any warnings.
pub fn execute(config_path: &Path) -> Result<()> {
    let mut config = Config::load_from(config_path)?;
    config.apply_env();
    let result = config.validate()?;

    println!("Configuration OK: {}", config_path.display());
    println!("  listen:        {}:{}", config.server.host, config.server.port);
    println!("  store:         {}", config.store.dir.display());
    println!(
        "  max file size: {}",
        crate::utils::human_size(config.upload.max_file_size)
    );
    println!("  allowed types: {}", config.upload.allowed_types.join(", "));

    if result.has_warnings() {
        println!("\nWarnings:");
        for warning in &result.warnings {
            println!("  - {warning}");
        }
    }
    Ok(())
}
