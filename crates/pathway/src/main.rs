//! Pathway CLI binary.

use anyhow::Result;
use pathway::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the pathway CLI.
///
/// Everything here is synchronous: the graph engine is pure and the only
/// I/O is reading the catalog and the plan file.
fn main() -> Result<()> {
    // Initialize tracing subscriber
    // Can be controlled via RUST_LOG environment variable
    // Example: RUST_LOG=pathway=debug,pathway_catalog=trace pathway info
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pathway=info,pathway_catalog=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting pathway CLI");

    let cli = Cli::parse_args();
    cli.execute()?;

    tracing::debug!("Pathway CLI completed successfully");
    Ok(())
}
