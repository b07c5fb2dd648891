// ABOUTME: TaskFlow command-line entry point
// ABOUTME: Subcommand dispatch over the data layer

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use taskflow_data::DataLayer;

mod cli;

use cli::fields::FieldCommands;
use cli::notes::NoteCommands;
use cli::tasks::TaskCommands;
use cli::workspace::WorkspaceCommands;

#[derive(Parser)]
#[command(name = "taskflow")]
#[command(about = "TaskFlow CLI - multi-workspace task tracking")]
#[command(version)]
struct Cli {
    /// Path to the document file (defaults to ~/.taskflow/document.json)
    #[arg(long, global = true)]
    document: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage workspaces
    #[command(subcommand)]
    Workspace(WorkspaceCommands),
    /// Manage tasks in the active workspace
    #[command(subcommand)]
    Task(TaskCommands),
    /// Manage field configuration in the active workspace
    #[command(subcommand)]
    Field(FieldCommands),
    /// Manage notes in the active workspace
    #[command(subcommand)]
    Note(NoteCommands),
    /// Show the activity log of the active workspace
    Log {
        /// Number of most recent entries to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Cli::parse();

    let layer = match &args.document {
        Some(path) => DataLayer::open(path.clone()),
        None => DataLayer::at_default_path(),
    };

    let result = match args.command {
        Commands::Workspace(command) => cli::workspace::handle(&layer, command).await,
        Commands::Task(command) => cli::tasks::handle(&layer, command).await,
        Commands::Field(command) => cli::fields::handle(&layer, command).await,
        Commands::Note(command) => cli::notes::handle(&layer, command).await,
        Commands::Log { limit } => cli::tasks::show_log(&layer, limit).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
