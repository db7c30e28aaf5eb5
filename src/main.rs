//! pibox - photo booth upload and gallery server.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use pibox_gallery::commands;
use pibox_gallery::constants::DEFAULT_CONFIG_FILE;

#[derive(Parser)]
#[command(name = "pibox", version, about = "Photo booth upload and gallery server")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the upload and gallery server
    Serve {
        /// Config file (defaults apply when missing)
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
        /// Override server.host
        #[arg(long)]
        host: Option<String>,
        /// Override server.port
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Validate a config file and exit
    CheckConfig {
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },
    /// Upload a photo to a running server
    Push {
        /// JPEG file to upload
        file: PathBuf,
        /// Upload endpoint, e.g. http://gallery.local:8080/upload
        #[arg(long)]
        url: String,
        /// Shared secret (falls back to PIBOX_API_KEY)
        #[arg(long)]
        api_key: Option<String>,
        /// Value sent in the `source` field
        #[arg(long, default_value = "pibox")]
        source: String,
        /// Retries after the first attempt
        #[arg(long, default_value_t = 3)]
        retries: u32,
        /// Per-attempt timeout in seconds
        #[arg(long, default_value_t = 30)]
        timeout: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match cli.command {
        Commands::Serve { config, host, port } => {
            commands::serve::execute(&config, host, port).await
        },
        Commands::CheckConfig { config } => commands::check_config::execute(&config),
        Commands::Push {
            file,
            url,
            api_key,
            source,
            retries,
            timeout,
        } => commands::push::execute(&file, url, api_key, source, retries, timeout).await,
    }
}

/// Initialize logging. `RUST_LOG` takes precedence over the `info` default.
fn init_tracing(json: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
