use clap::Subcommand;
use colored::*;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};

use taskflow_core::FieldType;
use taskflow_data::DataLayer;
use taskflow_schema::FieldConfigInput;

#[derive(Subcommand)]
pub enum FieldCommands {
    /// List field configuration for the active workspace
    List,
    /// Add a custom field
    Add {
        /// Field label shown on forms
        label: String,
        /// Field type: text, textarea, date, select, multiselect, tags, url
        #[arg(short = 't', long = "type", default_value = "text")]
        field_type: String,
        /// Group the field belongs to
        #[arg(short, long, default_value = "Custom")]
        group: String,
        /// Make the field required (required fields are always active)
        #[arg(short, long)]
        required: bool,
    },
    /// Activate or deactivate a field
    Toggle {
        /// Field ID or key
        id: String,
        /// Deactivate instead of activate
        #[arg(long)]
        off: bool,
    },
    /// Delete a custom field and strip its values from all tasks
    Remove {
        /// Field ID or key
        id: String,
    },
    /// List tag values in use across the workspace
    Tags,
}

fn parse_field_type(s: &str) -> Result<FieldType, String> {
    match s.to_lowercase().as_str() {
        "text" => Ok(FieldType::Text),
        "textarea" => Ok(FieldType::Textarea),
        "date" => Ok(FieldType::Date),
        "select" => Ok(FieldType::Select),
        "multiselect" => Ok(FieldType::MultiSelect),
        "tags" => Ok(FieldType::Tags),
        "url" => Ok(FieldType::Url),
        other => Err(format!("Unknown field type '{}'", other)),
    }
}

pub async fn handle(
    layer: &DataLayer,
    command: FieldCommands,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        FieldCommands::List => list(layer).await,
        FieldCommands::Add {
            label,
            field_type,
            group,
            required,
        } => add(layer, label, &field_type, group, required).await,
        FieldCommands::Toggle { id, off } => toggle(layer, &id, !off).await,
        FieldCommands::Remove { id } => remove(layer, &id).await,
        FieldCommands::Tags => tags(layer).await,
    }
}

async fn list(layer: &DataLayer) -> Result<(), Box<dyn std::error::Error>> {
    let workspace = layer.active_workspace().await?;
    let fields = workspace.fields().await?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Key", "Label", "Type", "Group", "Required", "Active"]);

    for field in &fields {
        table.add_row(vec![
            field.key.clone(),
            field.label.clone(),
            field.field_type.to_string(),
            field.group.clone(),
            if field.is_required { "yes" } else { "" }.to_string(),
            if field.is_active { "yes" } else { "" }.to_string(),
        ]);
    }

    println!("{}", table);
    Ok(())
}

async fn add(
    layer: &DataLayer,
    label: String,
    field_type: &str,
    group: String,
    required: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let field_type = parse_field_type(field_type)?;
    let workspace = layer.active_workspace().await?;

    let field = workspace
        .add_field(FieldConfigInput {
            label,
            field_type,
            group,
            is_required: required,
            ..Default::default()
        })
        .await?;

    println!("{}", format!("Field '{}' added", field.label).green());
    println!("ID: {}  key: {}", field.id.cyan(), field.key.cyan());
    Ok(())
}

async fn toggle(
    layer: &DataLayer,
    id: &str,
    active: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let workspace = layer.active_workspace().await?;
    workspace.set_field_active(id, active).await?;
    let state = if active { "active" } else { "inactive" };
    println!("{}", format!("Field '{}' is now {}", id, state).green());
    Ok(())
}

async fn remove(layer: &DataLayer, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let workspace = layer.active_workspace().await?;
    let field = workspace.delete_field(id).await?;
    println!("{}", format!("Field '{}' deleted", field.label).green());
    Ok(())
}

async fn tags(layer: &DataLayer) -> Result<(), Box<dyn std::error::Error>> {
    let workspace = layer.active_workspace().await?;
    let tags = workspace.available_tags().await?;

    if tags.is_empty() {
        println!("{}", "No tags in use".yellow());
        return Ok(());
    }
    for tag in tags {
        println!("{}", tag);
    }
    Ok(())
}
