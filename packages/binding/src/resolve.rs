// ABOUTME: Field value resolution with lazy type defaults
// ABOUTME: Defaults are applied at render time, never persisted

use taskflow_core::{FieldConfig, FieldType, FieldValue, Task};

/// Render-time default for a field type: empty string for text-likes, empty
/// list for list-likes, null for dates.
pub fn default_for(field_type: FieldType) -> FieldValue {
    match field_type {
        FieldType::Text | FieldType::Textarea | FieldType::Select | FieldType::Url => {
            FieldValue::Text(String::new())
        }
        FieldType::MultiSelect | FieldType::Tags => FieldValue::List(Vec::new()),
        FieldType::Date => FieldValue::Null,
    }
}

/// Resolve the current value a form shows for one field: built-in task
/// properties by key, then the custom-field bag, then the type default.
pub fn resolve_value(field: &FieldConfig, task: &Task) -> FieldValue {
    match field.key.as_str() {
        "title" => FieldValue::Text(task.title.clone()),
        "description" => FieldValue::Text(task.description.clone()),
        "status" => FieldValue::Text(task.status.clone()),
        "repositories" => FieldValue::List(task.repositories.clone()),
        "developers" => FieldValue::List(task.developers.clone()),
        "testers" => FieldValue::List(task.testers.clone()),
        "prLinks" => FieldValue::List(task.pr_links.clone()),
        "deploymentStatus" => task
            .deployment_status
            .clone()
            .map(FieldValue::Text)
            .unwrap_or_else(|| default_for(field.field_type)),
        key => task
            .custom_fields
            .get(key)
            .cloned()
            .unwrap_or_else(|| default_for(field.field_type)),
    }
}

/// One field of a rendered form
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedField {
    pub field: FieldConfig,
    pub value: FieldValue,
}

/// Active fields in schema order, each with its resolved value
pub fn form_view(fields: &[FieldConfig], task: &Task) -> Vec<ResolvedField> {
    let mut active: Vec<&FieldConfig> = fields.iter().filter(|f| f.is_active).collect();
    active.sort_by_key(|f| f.order);
    active
        .into_iter()
        .map(|field| ResolvedField {
            value: resolve_value(field, task),
            field: field.clone(),
        })
        .collect()
}
