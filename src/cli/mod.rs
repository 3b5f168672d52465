//! Command-line interface for readme-stats
//!
//! Provides `generate` and `cache` subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cache;
mod generate;
mod utils;

/// Generate GitHub profile statistics badges with an incremental lines-of-code cache
#[derive(Parser)]
#[command(name = "readme-stats")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch statistics and rewrite the SVG templates
    Generate(generate::GenerateArgs),

    /// Show or clear the lines-of-code cache without contacting GitHub
    Cache(cache::CacheArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Generate(args) => generate::run(args),
        Commands::Cache(args) => cache::run(args),
    }
}
