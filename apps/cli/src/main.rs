//! Syllabus CLI: scan a lesson directory into a curriculum model.
//!
//! Prints the assembled tree as JSON and resolves module slugs back to
//! their source documents.

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
