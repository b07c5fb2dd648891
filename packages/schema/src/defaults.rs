// ABOUTME: Built-in field set seeded into every new workspace
// ABOUTME: Protected core fields cannot be deactivated, deleted, or retyped

use taskflow_core::{FieldConfig, FieldOption, FieldType};

/// Core field keys that can never be deactivated, deleted, or type-changed
pub const PROTECTED_KEYS: [&str; 5] = [
    "title",
    "description",
    "status",
    "repositories",
    "developers",
];

/// Whether a field key belongs to the protected core set
pub fn is_protected(key: &str) -> bool {
    PROTECTED_KEYS.contains(&key)
}

fn option(value: &str) -> FieldOption {
    FieldOption {
        id: format!("option-{}", value.to_lowercase().replace(' ', "-")),
        label: value.to_string(),
        value: value.to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn field(
    key: &str,
    label: &str,
    field_type: FieldType,
    group: &str,
    order: usize,
    is_required: bool,
    is_active: bool,
    options: Option<Vec<FieldOption>>,
) -> FieldConfig {
    FieldConfig {
        id: format!("field-{}", key),
        key: key.to_string(),
        label: label.to_string(),
        field_type,
        group: group.to_string(),
        order,
        is_required,
        is_active,
        is_custom: false,
        options,
        base_url: None,
        sort_direction: None,
    }
}

/// The built-in schema every workspace starts with
pub fn default_fields() -> Vec<FieldConfig> {
    vec![
        field("title", "Title", FieldType::Text, "General", 0, true, true, None),
        field(
            "description",
            "Description",
            FieldType::Textarea,
            "General",
            1,
            false,
            true,
            None,
        ),
        field(
            "status",
            "Status",
            FieldType::Select,
            "General",
            2,
            true,
            true,
            Some(vec![
                option("To Do"),
                option("In Progress"),
                option("In Review"),
                option("Done"),
            ]),
        ),
        field(
            "tags",
            "Tags",
            FieldType::Tags,
            "General",
            3,
            false,
            true,
            Some(Vec::new()),
        ),
        field(
            "repositories",
            "Repositories",
            FieldType::MultiSelect,
            "Development",
            4,
            false,
            true,
            Some(vec![option("Web"), option("API"), option("Other")]),
        ),
        field(
            "prLinks",
            "PR Links",
            FieldType::Url,
            "Development",
            5,
            false,
            true,
            None,
        ),
        field(
            "deploymentStatus",
            "Deployment Status",
            FieldType::Select,
            "Development",
            6,
            false,
            false,
            Some(vec![
                option("Not Deployed"),
                option("Staging"),
                option("Production"),
            ]),
        ),
        field(
            "developers",
            "Developers",
            FieldType::MultiSelect,
            "People",
            7,
            false,
            true,
            None,
        ),
        field(
            "testers",
            "Testers",
            FieldType::MultiSelect,
            "People",
            8,
            false,
            true,
            None,
        ),
        field(
            "dueDate",
            "Due Date",
            FieldType::Date,
            "Planning",
            9,
            false,
            false,
            None,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fields_have_unique_keys_and_protected_core() {
        let fields = default_fields();
        let mut keys: Vec<&str> = fields.iter().map(|f| f.key.as_str()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), fields.len());

        for key in PROTECTED_KEYS {
            let f = fields.iter().find(|f| f.key == key).unwrap();
            assert!(f.is_active, "protected field '{}' must start active", key);
            assert!(!f.is_custom);
        }
    }
}
