//! Relay CLI
//!
//! Command-line interface for submitting pipelines to Relay and browsing
//! the method catalog.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;

#[derive(Parser)]
#[command(name = "relay")]
#[command(about = "Relay pipeline submission CLI", long_about = None)]
struct Cli {
    /// Ingestion service URL
    #[arg(long, env = "RELAY_INGEST_URL", default_value = "http://localhost:8080")]
    ingest_url: String,

    /// Catalog service URL
    #[arg(long, env = "RELAY_CATALOG_URL", default_value = "http://localhost:8082")]
    catalog_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config {
        ingest_url: cli.ingest_url,
        catalog_url: cli.catalog_url,
    };

    handle_command(cli.command, &config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use commands::{CatalogCommands, PipelineCommands};

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_submit() {
        let cli = Cli::try_parse_from([
            "relay",
            "--ingest-url",
            "http://ingest:9000",
            "pipeline",
            "submit",
            "pipeline.yaml",
        ])
        .unwrap();

        assert_eq!(cli.ingest_url, "http://ingest:9000");
        assert!(matches!(
            cli.command,
            Commands::Pipeline {
                command: PipelineCommands::Submit { ref file }
            } if file == "pipeline.yaml"
        ));
    }

    #[test]
    fn test_parse_methods_filter() {
        let cli =
            Cli::try_parse_from(["relay", "catalog", "methods", "--type", "crawler"]).unwrap();

        assert!(matches!(
            cli.command,
            Commands::Catalog {
                command: CatalogCommands::Methods { method_type: Some(ref t) }
            } if t == "crawler"
        ));
    }
}
