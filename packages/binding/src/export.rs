// ABOUTME: Plain-text (markdown-lite) rendering of a task
// ABOUTME: One bolded label per active field, in schema order

use taskflow_core::{FieldConfig, FieldValue, Task};

use crate::resolve::form_view;

fn render_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(s) => s.clone(),
        FieldValue::List(items) => items.join(", "),
        FieldValue::Flag(b) => if *b { "yes" } else { "no" }.to_string(),
        FieldValue::Null => String::new(),
    }
}

/// Render a task as markdown-lite text: bolded field labels, one field per
/// section, empty values skipped. Comments follow the fields.
pub fn render_text(fields: &[FieldConfig], task: &Task) -> String {
    let mut out = String::new();
    out.push_str(&format!("**{}**\n\n", task.title));

    for resolved in form_view(fields, task) {
        if resolved.field.key == "title" || resolved.value.is_empty() {
            continue;
        }
        out.push_str(&format!(
            "**{}**: {}\n",
            resolved.field.label,
            render_value(&resolved.value)
        ));
    }

    if !task.comments.is_empty() {
        out.push_str("\n**Comments**\n");
        for comment in &task.comments {
            let author = comment.author.as_deref().unwrap_or("anonymous");
            out.push_str(&format!(
                "- {} ({}): {}\n",
                author,
                comment.created_at.format("%Y-%m-%d"),
                comment.text
            ));
        }
    }

    out
}
