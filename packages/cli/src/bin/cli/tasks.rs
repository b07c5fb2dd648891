use clap::Subcommand;
use colored::*;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use inquire::Text;

use taskflow_binding::render_text;
use taskflow_core::{TaskCreateInput, TaskUpdateInput};
use taskflow_data::DataLayer;

use super::utils::{format_date, join_or_dash, truncate};

#[derive(Subcommand)]
pub enum TaskCommands {
    /// List tasks in the active workspace
    List {
        /// Show binned tasks instead of live ones
        #[arg(long)]
        bin: bool,
    },
    /// Show one task in full
    Show {
        /// Task ID to show
        id: String,
    },
    /// Add a new task
    Add {
        /// Task title
        #[arg(short, long)]
        title: Option<String>,
        /// Task description
        #[arg(short, long)]
        description: Option<String>,
        /// Initial status (defaults to "To Do")
        #[arg(short, long)]
        status: Option<String>,
        /// Repository names, repeatable
        #[arg(short, long)]
        repo: Vec<String>,
    },
    /// Update a task's core fields
    Update {
        /// Task ID to update
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Move a task to the bin, or delete it outright
    Remove {
        /// Task ID to remove
        id: String,
        /// Delete permanently instead of binning
        #[arg(long)]
        permanent: bool,
    },
    /// Restore a task from the bin
    Restore {
        /// Task ID to restore
        id: String,
    },
    /// Permanently delete everything in the bin
    EmptyBin,
}

pub async fn handle(
    layer: &DataLayer,
    command: TaskCommands,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        TaskCommands::List { bin } => list(layer, bin).await,
        TaskCommands::Show { id } => show(layer, &id).await,
        TaskCommands::Add {
            title,
            description,
            status,
            repo,
        } => add(layer, title, description, status, repo).await,
        TaskCommands::Update {
            id,
            title,
            description,
            status,
        } => update(layer, &id, title, description, status).await,
        TaskCommands::Remove { id, permanent } => remove(layer, &id, permanent).await,
        TaskCommands::Restore { id } => restore(layer, &id).await,
        TaskCommands::EmptyBin => empty_bin(layer).await,
    }
}

async fn list(layer: &DataLayer, bin: bool) -> Result<(), Box<dyn std::error::Error>> {
    let workspace = layer.active_workspace().await?;
    let tasks = if bin {
        workspace.binned_tasks().await?
    } else {
        workspace.get_tasks().await?
    };

    if tasks.is_empty() {
        let message = if bin { "The bin is empty" } else { "No tasks yet" };
        println!("{}", message.yellow());
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Title", "Status", "Repositories", "Updated"]);

    for task in &tasks {
        table.add_row(vec![
            task.id.clone(),
            truncate(&task.title, 40),
            task.status.clone(),
            join_or_dash(&task.repositories),
            format_date(&task.updated_at),
        ]);
    }

    println!("{}", table);
    println!("Total: {} tasks", tasks.len().to_string().cyan());
    Ok(())
}

async fn show(layer: &DataLayer, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let workspace = layer.active_workspace().await?;
    let Some(task) = workspace.get_task(id).await? else {
        eprintln!("{}", format!("Task with ID '{}' not found", id).red());
        return Err("Task not found".into());
    };

    let fields = workspace.fields().await?;
    print!("{}", render_text(&fields, &task));
    if task.deleted_at.is_some() {
        println!("{}", "(in bin)".yellow());
    }
    Ok(())
}

async fn add(
    layer: &DataLayer,
    title: Option<String>,
    description: Option<String>,
    status: Option<String>,
    repo: Vec<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let title = match title {
        Some(t) => t,
        None => Text::new("Task title:").prompt()?,
    };

    let workspace = layer.active_workspace().await?;
    let task = workspace
        .add_task(TaskCreateInput {
            title,
            description: description.unwrap_or_default(),
            status,
            repositories: repo,
            ..Default::default()
        })
        .await?;

    println!("{}", format!("Task '{}' created", task.title).green());
    println!("ID: {}", task.id.cyan());
    Ok(())
}

async fn update(
    layer: &DataLayer,
    id: &str,
    title: Option<String>,
    description: Option<String>,
    status: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let workspace = layer.active_workspace().await?;
    let updates = TaskUpdateInput {
        title,
        description,
        status,
        ..Default::default()
    };

    match workspace.update_task(id, updates).await? {
        Some(task) => {
            println!("{}", format!("Task '{}' updated", task.title).green());
        }
        None => {
            eprintln!("{}", format!("Task with ID '{}' not found", id).red());
        }
    }
    Ok(())
}

async fn remove(
    layer: &DataLayer,
    id: &str,
    permanent: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let workspace = layer.active_workspace().await?;
    let removed = if permanent {
        workspace.delete_task_permanently(id).await?
    } else {
        workspace.delete_task(id).await?
    };

    if removed {
        let verb = if permanent { "deleted" } else { "moved to bin" };
        println!("{}", format!("Task {}", verb).green());
    } else {
        eprintln!("{}", format!("Task with ID '{}' not found", id).red());
    }
    Ok(())
}

async fn restore(layer: &DataLayer, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let workspace = layer.active_workspace().await?;
    if workspace.restore_task(id).await? {
        println!("{}", "Task restored".green());
    } else {
        eprintln!("{}", format!("No binned task with ID '{}'", id).red());
    }
    Ok(())
}

async fn empty_bin(layer: &DataLayer) -> Result<(), Box<dyn std::error::Error>> {
    let workspace = layer.active_workspace().await?;
    let removed = workspace.empty_bin().await?;
    println!("Removed {} tasks from the bin", removed.to_string().cyan());
    Ok(())
}

pub async fn show_log(layer: &DataLayer, limit: usize) -> Result<(), Box<dyn std::error::Error>> {
    let workspace = layer.active_workspace().await?;
    let logs = workspace.logs().await?;

    if logs.is_empty() {
        println!("{}", "No activity yet".yellow());
        return Ok(());
    }

    for entry in logs.iter().rev().take(limit) {
        println!(
            "{} {}",
            format_date(&entry.timestamp).dimmed(),
            entry.message
        );
    }
    Ok(())
}
