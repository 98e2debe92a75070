//! Catalog command handlers
//!
//! Browse the method registry and the data ontology.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use relay_client::RelayClient;
use relay_core::domain::catalog::{Entity, Method};
use serde_json::Value as JsonValue;

use crate::config::Config;

/// Catalog subcommands
#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List methods
    Methods {
        /// Only methods of this type (crawler, ml_model, function)
        #[arg(long = "type")]
        method_type: Option<String>,
    },
    /// Show one method
    Method {
        /// Method ID
        id: String,
    },
    /// Show one ontology entity
    Entity {
        /// Entity ID
        id: String,
    },
}

/// Handle catalog commands
pub async fn handle_catalog_command(command: CatalogCommands, config: &Config) -> Result<()> {
    let client = RelayClient::new(&config.ingest_url, &config.catalog_url);

    match command {
        CatalogCommands::Methods { method_type } => {
            list_methods(&client, method_type.as_deref()).await
        }
        CatalogCommands::Method { id } => get_method(&client, &id).await,
        CatalogCommands::Entity { id } => get_entity(&client, &id).await,
    }
}

/// List methods
async fn list_methods(client: &RelayClient, method_type: Option<&str>) -> Result<()> {
    let list = client
        .list_methods(method_type)
        .await
        .context("Failed to list methods")?;

    if list.methods.is_empty() {
        println!("{}", "No methods found.".yellow());
        return Ok(());
    }

    println!("{}", format!("Found {} method(s):", list.count).bold());
    println!();
    for method in &list.methods {
        println!("  {} {}", "▸".cyan(), method.name.bold());
        println!("    ID:   {}", method.method_id.dimmed());
        println!("    Type: {}", method.method_type.dimmed());
        println!();
    }

    Ok(())
}

/// Display a single method
async fn get_method(client: &RelayClient, id: &str) -> Result<()> {
    let method = client
        .get_method(id)
        .await
        .with_context(|| format!("Failed to get method {}", id))?;

    print_method(&method);

    Ok(())
}

/// Display a single entity
async fn get_entity(client: &RelayClient, id: &str) -> Result<()> {
    let entity = client
        .get_entity(id)
        .await
        .with_context(|| format!("Failed to get entity {}", id))?;

    print_entity(&entity);

    Ok(())
}

fn print_method(method: &Method) {
    println!("{}", "Method Details:".bold());
    println!("  ID:          {}", method.method_id.cyan());
    println!("  Name:        {}", method.name.bold());
    println!("  Type:        {}", method.method_type);
    if !method.description.is_empty() {
        println!("  Description: {}", method.description);
    }
    if !method.tags.is_empty() {
        println!("  Tags:        {}", method.tags.join(", "));
    }
    print_json_section("Inputs:", &method.inputs);
    print_json_section("Outputs:", &method.outputs);
}

fn print_entity(entity: &Entity) {
    println!("{}", "Entity Details:".bold());
    println!("  ID:          {}", entity.entity_id.cyan());
    println!("  Name:        {}", entity.name.bold());
    if !entity.description.is_empty() {
        println!("  Description: {}", entity.description);
    }
    print_json_section("Schema:", &entity.schema);
}

fn print_json_section(title: &str, value: &JsonValue) {
    if value.is_null() {
        return;
    }
    println!("\n{}", title.bold());
    println!("{}", "─".repeat(80).dimmed());
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    println!("{}", pretty);
    println!("{}", "─".repeat(80).dimmed());
}
