use clap::Subcommand;
use colored::*;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use inquire::Text;

use taskflow_data::{DataLayer, NoteCreateInput};

use super::utils::{format_date, truncate};

#[derive(Subcommand)]
pub enum NoteCommands {
    /// List notes in the active workspace
    List,
    /// Add a note
    Add {
        /// Note content
        #[arg(short, long)]
        content: Option<String>,
        /// Optional note title
        #[arg(short, long)]
        title: Option<String>,
    },
    /// Delete a note
    Remove {
        /// Note ID to delete
        id: String,
    },
}

pub async fn handle(
    layer: &DataLayer,
    command: NoteCommands,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        NoteCommands::List => list(layer).await,
        NoteCommands::Add { content, title } => add(layer, content, title).await,
        NoteCommands::Remove { id } => remove(layer, &id).await,
    }
}

async fn list(layer: &DataLayer) -> Result<(), Box<dyn std::error::Error>> {
    let workspace = layer.active_workspace().await?;
    let notes = workspace.notes().await?;

    if notes.is_empty() {
        println!("{}", "No notes yet".yellow());
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Title", "Content", "Updated"]);

    for note in &notes {
        table.add_row(vec![
            note.id.clone(),
            note.title.clone().unwrap_or_default(),
            truncate(&note.content, 50),
            format_date(&note.updated_at),
        ]);
    }

    println!("{}", table);
    Ok(())
}

async fn add(
    layer: &DataLayer,
    content: Option<String>,
    title: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = match content {
        Some(c) => c,
        None => Text::new("Note content:").prompt()?,
    };

    let workspace = layer.active_workspace().await?;
    let note = workspace.add_note(NoteCreateInput { title, content }).await?;
    println!("{}", "Note added".green());
    println!("ID: {}", note.id.cyan());
    Ok(())
}

async fn remove(layer: &DataLayer, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let workspace = layer.active_workspace().await?;
    if workspace.delete_note(id).await? {
        println!("{}", "Note deleted".green());
    } else {
        eprintln!("{}", format!("Note with ID '{}' not found", id).red());
    }
    Ok(())
}
