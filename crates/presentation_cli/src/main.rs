//! LocationIQ CLI
//!
//! Command-line interface for forward and reverse geocoding.

#![allow(clippy::print_stdout)]

mod output;
mod settings;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use integration_locationiq::{GeocodingClient, LocationIqClient, LocationIqConfig};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// LocationIQ CLI
#[derive(Parser)]
#[command(name = "locationiq-cli")]
#[command(author, version, about = "LocationIQ geocoding CLI", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a config file (default: ./locationiq.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// LocationIQ API key
    #[arg(long, env = "LOCATIONIQ_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Maximum number of results (1-50)
    #[arg(short, long, global = true)]
    limit: Option<u8>,

    /// Preferred result language (e.g. "en", "de")
    #[arg(long, global = true)]
    language: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for places matching a free-form query
    ///
    /// Example: locationiq-cli geocode "Lingampally, Hyderabad"
    Geocode {
        /// Address or place to search for
        query: String,

        /// Print the raw JSON response
        #[arg(long)]
        raw: bool,
    },

    /// Look up the place at the given coordinates
    ///
    /// Example: locationiq-cli reverse 40.7487727 -73.9849336
    Reverse {
        /// Latitude
        #[arg(allow_negative_numbers = true)]
        lat: f64,

        /// Longitude
        #[arg(allow_negative_numbers = true)]
        lon: f64,

        /// Print the raw JSON response
        #[arg(long)]
        raw: bool,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Apply command-line flags on top of the loaded configuration
fn apply_overrides(mut config: LocationIqConfig, cli: &Cli) -> LocationIqConfig {
    if let Some(api_key) = &cli.api_key {
        config.api_key = api_key.clone().into();
    }
    if let Some(base_url) = &cli.base_url {
        config.base_url.clone_from(base_url);
    }
    if let Some(limit) = cli.limit {
        config.limit = limit;
    }
    if let Some(language) = &cli.language {
        config.language.clone_from(language);
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = Some(timeout);
    }
    config
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = log_filter_from_verbosity(cli.verbose);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = settings::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let config = apply_overrides(config, &cli);
    debug!(?config, "Loaded configuration");

    let client = LocationIqClient::new(config)?;

    let (response, raw) = match &cli.command {
        Commands::Geocode { query, raw } => (client.geocode(query).await?, *raw),
        Commands::Reverse { lat, lon, raw } => (client.reverse_geocode(*lat, *lon).await?, *raw),
    };

    println!("{}", output::render(&response, raw)?);

    Ok(())
}
