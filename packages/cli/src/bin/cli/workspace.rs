use clap::Subcommand;
use colored::*;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use inquire::{Confirm, Text};

use taskflow_data::DataLayer;

#[derive(Subcommand)]
pub enum WorkspaceCommands {
    /// List all workspaces
    List,
    /// Add a new workspace and switch to it
    Add {
        /// Workspace name
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Switch the active workspace
    Switch {
        /// Workspace ID to activate
        id: String,
    },
    /// Delete a workspace and all its data
    Remove {
        /// Workspace ID to delete
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn handle(
    layer: &DataLayer,
    command: WorkspaceCommands,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        WorkspaceCommands::List => list(layer).await,
        WorkspaceCommands::Add { name } => add(layer, name).await,
        WorkspaceCommands::Switch { id } => switch(layer, &id).await,
        WorkspaceCommands::Remove { id, yes } => remove(layer, &id, yes).await,
    }
}

async fn list(layer: &DataLayer) -> Result<(), Box<dyn std::error::Error>> {
    let companies = layer.list_companies().await?;
    let active_id = layer.active_company_id().await?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Name", "Active"]);

    for company in &companies {
        let marker = if company.id == active_id { "*" } else { "" };
        table.add_row(vec![
            company.id.clone(),
            company.name.clone(),
            marker.to_string(),
        ]);
    }

    println!("{}", table);
    Ok(())
}

async fn add(layer: &DataLayer, name: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let name = match name {
        Some(n) => n,
        None => Text::new("Workspace name:").prompt()?,
    };

    let company = layer.add_company(&name).await?;
    println!(
        "{}",
        format!("Workspace '{}' created and activated", company.name).green()
    );
    println!("ID: {}", company.id.cyan());
    Ok(())
}

async fn switch(layer: &DataLayer, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let before = layer.active_company_id().await?;
    layer.set_active_company(id).await?;
    let after = layer.active_company_id().await?;

    if after == id {
        println!("{}", format!("Active workspace is now {}", id).green());
    } else if before == after {
        eprintln!("{}", format!("No workspace with ID '{}'", id).yellow());
    }
    Ok(())
}

async fn remove(layer: &DataLayer, id: &str, yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !yes {
        let confirmed = Confirm::new(&format!(
            "Delete workspace '{}' and all its tasks?",
            id
        ))
        .with_default(false)
        .prompt()?;
        if !confirmed {
            println!("Cancelled");
            return Ok(());
        }
    }

    if layer.delete_company(id).await? {
        println!("{}", format!("Workspace '{}' deleted", id).green());
    } else {
        eprintln!(
            "{}",
            "Workspace not found, or it is the last one remaining".yellow()
        );
    }
    Ok(())
}
