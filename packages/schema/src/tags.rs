// ABOUTME: Tag option handling for tags-type fields
// ABOUTME: The available set unions configured options with values observed on tasks

use std::collections::BTreeSet;

use tracing::debug;

use taskflow_core::{FieldConfig, FieldType, FieldValue, Task};

fn tag_field_keys(fields: &[FieldConfig]) -> Vec<String> {
    fields
        .iter()
        .filter(|f| f.field_type == FieldType::Tags)
        .map(|f| f.key.clone())
        .collect()
}

/// All tag values a picker can offer: statically configured options plus
/// every value already present on a task, deduplicated and sorted.
pub fn available_tags(fields: &[FieldConfig], tasks: &[Task]) -> Vec<String> {
    let mut set = BTreeSet::new();

    for field in fields.iter().filter(|f| f.field_type == FieldType::Tags) {
        if let Some(options) = &field.options {
            for option in options {
                set.insert(option.value.clone());
            }
        }
        for task in tasks {
            if let Some(FieldValue::List(values)) = task.custom_fields.get(&field.key) {
                for value in values {
                    set.insert(value.clone());
                }
            }
        }
    }

    set.into_iter().collect()
}

/// Delete a tag everywhere: from the option lists of tags fields and from
/// every task's stored tag list. Returns the number of occurrences removed.
pub fn delete_tag(fields: &mut [FieldConfig], tasks: &mut [Task], value: &str) -> usize {
    let mut removed = 0;

    for field in fields.iter_mut().filter(|f| f.field_type == FieldType::Tags) {
        if let Some(options) = &mut field.options {
            let before = options.len();
            options.retain(|option| option.value != value);
            removed += before - options.len();
        }
    }

    for key in tag_field_keys(fields) {
        for task in tasks.iter_mut() {
            if let Some(FieldValue::List(values)) = task.custom_fields.get_mut(&key) {
                let before = values.len();
                values.retain(|v| v != value);
                removed += before - values.len();
            }
        }
    }

    debug!("Deleted tag '{}' ({} occurrences)", value, removed);
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_fields;
    use taskflow_core::FieldOption;

    fn blank_task(id: &str) -> Task {
        let now = chrono::Utc::now();
        Task {
            id: id.to_string(),
            title: "t".to_string(),
            description: String::new(),
            status: "To Do".to_string(),
            repositories: Vec::new(),
            developers: Vec::new(),
            testers: Vec::new(),
            custom_fields: Default::default(),
            pr_links: Vec::new(),
            deployment_status: None,
            attachments: Vec::new(),
            comments: Vec::new(),
            reminder: None,
            is_favorite: false,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_available_tags_unions_options_and_observed_values() {
        let mut fields = default_fields();
        let tags = fields
            .iter_mut()
            .find(|f| f.field_type == FieldType::Tags)
            .unwrap();
        tags.options = Some(vec![FieldOption {
            id: "option-planned".to_string(),
            label: "planned".to_string(),
            value: "planned".to_string(),
        }]);

        let mut task = blank_task("task-1");
        task.custom_fields.insert(
            "tags".to_string(),
            FieldValue::List(vec!["urgent".to_string(), "planned".to_string()]),
        );

        let available = available_tags(&fields, &[task]);
        assert_eq!(available, vec!["planned".to_string(), "urgent".to_string()]);
    }

    #[test]
    fn test_delete_tag_cascades_to_tasks() {
        let mut fields = default_fields();
        let mut task = blank_task("task-1");
        task.custom_fields.insert(
            "tags".to_string(),
            FieldValue::List(vec!["urgent".to_string(), "keep".to_string()]),
        );
        let mut tasks = vec![task];

        let removed = delete_tag(&mut fields, &mut tasks, "urgent");
        assert_eq!(removed, 1);

        let values = tasks[0].custom_fields.get("tags").unwrap();
        assert_eq!(values, &FieldValue::List(vec!["keep".to_string()]));
        assert!(!available_tags(&fields, &tasks).contains(&"urgent".to_string()));
    }
}
