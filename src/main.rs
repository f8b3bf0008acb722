use anyhow::{Context, Result};
use catalog_harvester::config::{find_config_file, load_config};
use catalog_harvester::Harvester;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Catalog Harvester - download MARC records and their PDFs from a library portal
#[derive(Parser, Debug)]
#[command(name = "catalog-harvester")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Download MARC records and their PDFs from a library portal", long_about = None)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Settings file (default: ./settings.json, ./harvest.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| format!("catalog_harvester={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = match cli.config {
        Some(path) => path,
        None => find_config_file().context("No settings.json or harvest.toml found")?,
    };
    tracing::info!("Using config file: {}", config_path.display());

    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    config
        .storage
        .ensure()
        .context("Failed to create storage directories")?;

    tracing::info!(
        "Harvesting records {} down to {} from {}",
        config.last_record,
        config.first_record + 1,
        config.base_url
    );

    let harvester = Harvester::new(config)?;

    if let Err(e) = harvester.run().await {
        tracing::error!("Harvest aborted: {}", e);
        return Err(e.into());
    }

    Ok(())
}
