//! vc-scout CLI: website enrichment service.
//!
//! Serves the `POST /api/enrich` endpoint, or enriches a single URL from
//! the command line.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
