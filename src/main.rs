//! Retail Champions CLI
//!
//! Main application entry point

use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use tracing::{debug, error};

use RetailChampions::{
    config::Settings,
    handlers::{handle_command, Command},
    services::ServiceFactory,
    storage::LocalStorage,
    utils::logging,
};

/// Operator and admin client for the Retail Champions contest platform
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file, extension optional
    #[arg(long, short = 'c', default_value = "config")]
    config: String,

    /// Override the API base URL
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();

    // Load configuration
    let mut settings = Settings::load_from(&args.config).context("failed to load configuration")?;
    if let Some(api_url) = args.api_url {
        settings.api.base_url = api_url;
    }
    settings.validate()?;

    // Initialize logging; the guard flushes the file writer on exit
    let log_guard = logging::init_logging(&settings.logging)?;
    debug!(version = RetailChampions::VERSION, api = %settings.api.base_url, "Starting");

    let storage = LocalStorage::open(&settings.storage.path)
        .with_context(|| format!("failed to open {}", settings.storage.path.display()))?;
    let services = ServiceFactory::new(settings, storage)?;

    if let Err(e) = handle_command(args.command, services).await {
        error!(severity = %e.severity(), recoverable = e.is_recoverable(), "Command failed: {}", e);
        eprintln!("Error: {}", e.user_message());
        drop(log_guard);
        std::process::exit(1);
    }

    Ok(())
}
