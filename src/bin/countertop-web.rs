//! Countertop Site Web Server Binary
//!
//! This binary starts the API behind the marketing site: pricing, estimates,
//! lead capture, and the room redesign proxy.
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings (port 3001, platform config file)
//! countertop-web
//!
//! # Specify port and config file
//! OPENAI_API_KEY=... countertop-web --port 8080 --config ./site.toml
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use countertop_site::config::Config;
use countertop_site::models::PricingConfig;
use countertop_site::web;

/// Countertop Site Web Server - estimator and redesign API
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3001")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Configuration file.
    /// Defaults to the platform-specific config file:
    /// - Linux: ~/.config/CountertopSite/config.toml
    /// - macOS: ~/Library/Application Support/CountertopSite/config.toml
    /// - Windows: %APPDATA%\CountertopSite\config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pricing JSON (overrides the path in the configuration)
    #[arg(long)]
    pricing: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let pricing_path = args.pricing.unwrap_or_else(|| config.pricing.path.clone());
    let pricing = PricingConfig::load(&pricing_path).context(format!(
        "Failed to load pricing: {}",
        pricing_path.display()
    ))?;

    info!("Pricing: {}", pricing_path.display());
    info!("Lead store: {}", config.leads.store_dir.display());

    // Build socket address
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;

    // Start the server
    web::run_server(config, pricing, addr).await
}
