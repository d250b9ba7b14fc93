//! Countertop Site - command-line estimator
//!
//! Computes price ranges from the site's pricing document and prints the
//! lead text or mail link a visitor's submission would produce.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use countertop_site::cli::{EstimateArgs, ExitCode, MaterialsArgs};
use countertop_site::constants::APP_BINARY_NAME;

/// Countertop Site - price-range estimator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute an estimate for a material and area
    Estimate(EstimateArgs),
    /// List materials and add-ons from the pricing document
    Materials(MaterialsArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so JSON output stays clean
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match &cli.command {
        Command::Estimate(args) => args.execute(),
        Command::Materials(args) => args.execute(),
    };

    match result {
        Ok(()) => ExitCode::Success.into(),
        Err(e) => {
            eprintln!("{APP_BINARY_NAME}: {e}");
            e.exit_code.into()
        }
    }
}
