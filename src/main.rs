//! # lighthouse-push
//!
//! ```bash
//! lighthouse-push https://example.com https://example.org
//! ```
//!
//! See [`lighthouse_push::cli`] for all options.

use anyhow::Result;
use clap::Parser;
use lighthouse_push::cli::Cli;
use lighthouse_push::config::RunConfig;
use lighthouse_push::runtime::{initialize, run};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize(cli.verbose)?;

    let config = RunConfig::try_from(cli)?;
    run(&config).await?;

    Ok(())
}
