//! Pipeline command handlers
//!
//! Submits pipeline documents and queries their run status.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use relay_client::RelayClient;
use relay_core::domain::status::{PipelineStatus, PipelineStatusRecord};

use crate::config::Config;

/// Pipeline subcommands
#[derive(Subcommand)]
pub enum PipelineCommands {
    /// Submit a pipeline document (YAML or JSON)
    Submit {
        /// Path to the pipeline file, or `-` for stdin
        file: String,
    },
    /// Show the run status of a pipeline
    Status {
        /// Pipeline ID
        id: String,
    },
}

/// Handle pipeline commands
pub async fn handle_pipeline_command(command: PipelineCommands, config: &Config) -> Result<()> {
    let client = RelayClient::new(&config.ingest_url, &config.catalog_url);

    match command {
        PipelineCommands::Submit { file } => submit_pipeline(&client, &file).await,
        PipelineCommands::Status { id } => pipeline_status(&client, &id).await,
    }
}

/// Read a pipeline file and submit it
async fn submit_pipeline(client: &RelayClient, path: &str) -> Result<()> {
    let document = if path == "-" {
        let mut buf = Vec::new();
        std::io::Read::read_to_end(&mut std::io::stdin(), &mut buf)
            .context("Failed to read pipeline from stdin")?;
        buf
    } else {
        std::fs::read(path).with_context(|| format!("Failed to read pipeline file: {}", path))?
    };

    let accepted = client
        .submit_pipeline(document)
        .await
        .context("Failed to submit pipeline")?;

    println!("{}", "✓ Pipeline submitted!".green().bold());
    println!("  Pipeline ID: {}", accepted.pipeline_id.cyan());
    println!("  Workspace:   {}", accepted.workspace_id.dimmed());
    println!("  Project:     {}", accepted.project_id.dimmed());
    println!("  Status:      {}", accepted.status.yellow());
    println!("  Monitor:     {}", accepted.monitoring_link.underline());

    Ok(())
}

/// Display the run status of a pipeline
async fn pipeline_status(client: &RelayClient, id: &str) -> Result<()> {
    let record = match client.pipeline_status(id).await {
        Ok(record) => record,
        Err(e) if e.is_not_found() => {
            println!("{}", format!("No run found for pipeline {}", id).yellow());
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to get pipeline status"),
    };

    print_status(&record);

    Ok(())
}

/// Print a pipeline status record
fn print_status(record: &PipelineStatusRecord) {
    println!("{}", "Pipeline Status:".bold());
    println!("  Pipeline ID: {}", record.pipeline_id.cyan());
    println!("  Status:      {}", colorize_status(record.status));
    if let Some(run_id) = &record.run_id {
        println!("  Run ID:      {}", run_id.dimmed());
    }
    if let Some(started_at) = record.started_at {
        println!("  Started:     {}", started_at.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(closed_at) = record.closed_at {
        println!("  Closed:      {}", closed_at.format("%Y-%m-%d %H:%M:%S"));
    }
}

fn colorize_status(status: PipelineStatus) -> ColoredString {
    let text = status.to_string();
    match status {
        PipelineStatus::Running => text.yellow(),
        PipelineStatus::Completed => text.green(),
        PipelineStatus::Failed | PipelineStatus::TimedOut | PipelineStatus::Terminated => {
            text.red()
        }
        _ => text.dimmed(),
    }
}
