//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod catalog;
mod pipeline;

pub use catalog::CatalogCommands;
pub use pipeline::PipelineCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Pipeline submission and status
    Pipeline {
        #[command(subcommand)]
        command: PipelineCommands,
    },
    /// Method registry and ontology lookups
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Pipeline { command } => pipeline::handle_pipeline_command(command, config).await,
        Commands::Catalog { command } => catalog::handle_catalog_command(command, config).await,
    }
}
