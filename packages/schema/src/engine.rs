// ABOUTME: Field lifecycle and ordering operations
// ABOUTME: Every mutation recomputes a dense order with active fields first

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::debug;

use taskflow_core::{
    generate_entity_id, FieldConfig, FieldOption, FieldType, RepositoryConfig, SortDirection, Task,
};

use crate::cascade::strip_field_values;
use crate::defaults::is_protected;
use crate::error::{SchemaError, SchemaResult};

/// Input for creating a custom field
#[derive(Debug, Clone, Default)]
pub struct FieldConfigInput {
    /// Storage key; derived from the label when absent
    pub key: Option<String>,
    pub label: String,
    pub field_type: FieldType,
    pub group: String,
    pub is_required: bool,
    pub options: Option<Vec<FieldOption>>,
    pub base_url: Option<String>,
}

/// Partial update for an existing field
#[derive(Debug, Clone, Default)]
pub struct FieldConfigUpdate {
    pub label: Option<String>,
    pub group: Option<String>,
    pub field_type: Option<FieldType>,
    pub options: Option<Vec<FieldOption>>,
    pub base_url: Option<String>,
    pub sort_direction: Option<SortDirection>,
}

/// Find a field by id or key
pub fn find_field<'a>(fields: &'a [FieldConfig], id_or_key: &str) -> Option<&'a FieldConfig> {
    fields
        .iter()
        .find(|f| f.id == id_or_key || f.key == id_or_key)
}

fn find_field_mut<'a>(
    fields: &'a mut [FieldConfig],
    id_or_key: &str,
) -> Option<&'a mut FieldConfig> {
    fields
        .iter_mut()
        .find(|f| f.id == id_or_key || f.key == id_or_key)
}

fn slug_key(label: &str) -> String {
    let mut key = String::new();
    for c in label.trim().chars() {
        if c.is_ascii_alphanumeric() {
            key.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() && !key.ends_with('_') {
            key.push('_');
        }
    }
    key.trim_matches('_').to_string()
}

/// Recompute a dense `order` across all fields.
///
/// Active fields keep their explicit ordering (ties broken by label); inactive
/// fields follow, sorted alphabetically by label for browsing. After the pass
/// every field's `order` equals its index in the sorted list.
pub fn normalize_order(fields: &mut Vec<FieldConfig>) {
    fields.sort_by(|a, b| match b.is_active.cmp(&a.is_active) {
        Ordering::Equal => {
            if a.is_active {
                a.order.cmp(&b.order).then_with(|| a.label.cmp(&b.label))
            } else {
                a.label.to_lowercase().cmp(&b.label.to_lowercase())
            }
        }
        other => other,
    });
    for (index, field) in fields.iter_mut().enumerate() {
        field.order = index;
    }
}

/// Add a user-defined field; it lands at the end of the active list
pub fn add_custom_field(
    fields: &mut Vec<FieldConfig>,
    input: FieldConfigInput,
) -> SchemaResult<FieldConfig> {
    let key = match input.key {
        Some(ref key) if !key.trim().is_empty() => key.trim().to_string(),
        _ => slug_key(&input.label),
    };
    if key.is_empty() {
        return Err(SchemaError::InvalidKey);
    }
    if fields.iter().any(|f| f.key.eq_ignore_ascii_case(&key)) {
        return Err(SchemaError::DuplicateKey(key));
    }

    let field = FieldConfig {
        id: generate_entity_id("field"),
        key,
        label: input.label,
        field_type: input.field_type,
        group: input.group,
        // Past every existing order so normalize_order appends it
        order: usize::MAX,
        is_required: input.is_required,
        is_active: true,
        is_custom: true,
        options: input.options,
        base_url: input.base_url,
        sort_direction: None,
    };
    debug!("Adding custom field '{}' ({})", field.label, field.id);
    fields.push(field.clone());
    normalize_order(fields);
    Ok(fields
        .iter()
        .find(|f| f.id == field.id)
        .cloned()
        .unwrap_or(field))
}

/// Apply a partial update to a field. Type changes are rejected for protected
/// core fields.
pub fn update_field(
    fields: &mut Vec<FieldConfig>,
    id: &str,
    update: FieldConfigUpdate,
) -> SchemaResult<FieldConfig> {
    let field = find_field_mut(fields, id).ok_or_else(|| SchemaError::UnknownField(id.into()))?;

    if let Some(field_type) = update.field_type {
        if field_type != field.field_type && is_protected(&field.key) {
            return Err(SchemaError::ProtectedField(field.key.clone()));
        }
        field.field_type = field_type;
    }
    if let Some(label) = update.label {
        field.label = label;
    }
    if let Some(group) = update.group {
        field.group = group;
    }
    if let Some(options) = update.options {
        field.options = Some(options);
    }
    if let Some(base_url) = update.base_url {
        field.base_url = Some(base_url);
    }
    if let Some(direction) = update.sort_direction {
        field.sort_direction = Some(direction);
    }
    Ok(field.clone())
}

/// Toggle a field active/inactive. Protected and required fields must stay
/// active.
pub fn set_active(fields: &mut Vec<FieldConfig>, id: &str, active: bool) -> SchemaResult<()> {
    let field = find_field_mut(fields, id).ok_or_else(|| SchemaError::UnknownField(id.into()))?;

    if !active {
        if is_protected(&field.key) {
            return Err(SchemaError::ProtectedField(field.key.clone()));
        }
        if field.is_required {
            return Err(SchemaError::RequiredField(field.key.clone()));
        }
    }
    if field.is_active != active {
        debug!("Setting field '{}' active={}", field.key, active);
        field.is_active = active;
        normalize_order(fields);
    }
    Ok(())
}

/// Flip the required flag. Marking a field required forces it active.
pub fn set_required(fields: &mut Vec<FieldConfig>, id: &str, required: bool) -> SchemaResult<()> {
    let field = find_field_mut(fields, id).ok_or_else(|| SchemaError::UnknownField(id.into()))?;

    field.is_required = required;
    if required && !field.is_active {
        field.is_active = true;
        normalize_order(fields);
    }
    Ok(())
}

/// Remove a custom, non-required field and strip its stored values from every
/// task in the workspace.
pub fn delete_field(
    fields: &mut Vec<FieldConfig>,
    tasks: &mut [Task],
    id: &str,
) -> SchemaResult<FieldConfig> {
    let index = fields
        .iter()
        .position(|f| f.id == id || f.key == id)
        .ok_or_else(|| SchemaError::UnknownField(id.into()))?;

    let field = &fields[index];
    if is_protected(&field.key) {
        return Err(SchemaError::ProtectedField(field.key.clone()));
    }
    if !field.is_custom {
        return Err(SchemaError::NotCustom(field.key.clone()));
    }
    if field.is_required {
        return Err(SchemaError::RequiredField(field.key.clone()));
    }

    let field = fields.remove(index);
    let stripped = strip_field_values(&field, tasks);
    debug!(
        "Deleted field '{}', stripped values from {} tasks",
        field.key, stripped
    );
    normalize_order(fields);
    Ok(field)
}

/// Apply a drag-drop ordering of active fields. Ids missing from the slice
/// keep their relative position after the reordered ones; unknown ids are
/// ignored.
pub fn reorder(fields: &mut Vec<FieldConfig>, ordered_active_ids: &[String]) {
    let positions: HashMap<&str, usize> = ordered_active_ids
        .iter()
        .enumerate()
        .map(|(index, id)| (id.as_str(), index))
        .collect();

    for field in fields.iter_mut().filter(|f| f.is_active) {
        match positions.get(field.id.as_str()) {
            Some(&position) => field.order = position,
            // Orders in a hand-edited document may be arbitrary
            None => field.order = field.order.saturating_add(ordered_active_ids.len()),
        }
    }
    normalize_order(fields);
}

/// Replace the repository option list and its parallel base-URL config,
/// keeping the two name-aligned.
pub fn set_repositories(
    fields: &mut Vec<FieldConfig>,
    repository_configs: &mut Vec<RepositoryConfig>,
    entries: Vec<RepositoryConfig>,
) -> SchemaResult<()> {
    let field = find_field_mut(fields, "repositories")
        .ok_or_else(|| SchemaError::UnknownField("repositories".into()))?;

    field.options = Some(
        entries
            .iter()
            .map(|entry| FieldOption {
                id: format!("option-{}", slug_key(&entry.name)),
                label: entry.name.clone(),
                value: entry.name.clone(),
            })
            .collect(),
    );
    *repository_configs = entries;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_fields;
    use pretty_assertions::assert_eq;

    fn assert_dense_order(fields: &[FieldConfig]) {
        let active_count = fields.iter().filter(|f| f.is_active).count();
        let mut orders: Vec<usize> = fields
            .iter()
            .filter(|f| f.is_active)
            .map(|f| f.order)
            .collect();
        orders.sort_unstable();
        assert_eq!(orders, (0..active_count).collect::<Vec<_>>());

        // Inactive fields all sort after active ones
        for field in fields.iter().filter(|f| !f.is_active) {
            assert!(field.order >= active_count);
        }
    }

    fn custom_input(label: &str) -> FieldConfigInput {
        FieldConfigInput {
            label: label.to_string(),
            field_type: FieldType::Text,
            group: "Custom".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_custom_field_appends_to_active_list() {
        let mut fields = default_fields();
        let field = add_custom_field(&mut fields, custom_input("Release Notes")).unwrap();

        assert_eq!(field.key, "release_notes");
        assert!(field.is_active);
        assert!(field.is_custom);
        let active_count = fields.iter().filter(|f| f.is_active).count();
        assert_eq!(field.order, active_count - 1);
        assert_dense_order(&fields);
    }

    #[test]
    fn test_add_duplicate_key_rejected() {
        let mut fields = default_fields();
        let result = add_custom_field(
            &mut fields,
            FieldConfigInput {
                key: Some("status".to_string()),
                label: "Another Status".to_string(),
                field_type: FieldType::Select,
                group: "General".to_string(),
                ..Default::default()
            },
        );
        assert_eq!(result, Err(SchemaError::DuplicateKey("status".to_string())));
    }

    #[test]
    fn test_order_stays_dense_after_toggles() {
        let mut fields = default_fields();
        add_custom_field(&mut fields, custom_input("Risk")).unwrap();
        add_custom_field(&mut fields, custom_input("Effort")).unwrap();

        set_active(&mut fields, "field-prLinks", false).unwrap();
        assert_dense_order(&fields);

        set_active(&mut fields, "field-deploymentStatus", true).unwrap();
        assert_dense_order(&fields);
    }

    #[test]
    fn test_protected_field_cannot_be_deactivated() {
        let mut fields = default_fields();
        let result = set_active(&mut fields, "field-title", false);
        assert_eq!(
            result,
            Err(SchemaError::ProtectedField("title".to_string()))
        );
        assert!(find_field(&fields, "title").unwrap().is_active);
    }

    #[test]
    fn test_required_field_cannot_be_deactivated() {
        let mut fields = default_fields();
        add_custom_field(&mut fields, custom_input("Severity")).unwrap();
        set_required(&mut fields, "severity", true).unwrap();

        let result = set_active(&mut fields, "severity", false);
        assert_eq!(
            result,
            Err(SchemaError::RequiredField("severity".to_string()))
        );
        assert!(find_field(&fields, "severity").unwrap().is_active);
    }

    #[test]
    fn test_required_forces_active() {
        let mut fields = default_fields();
        set_required(&mut fields, "field-dueDate", true).unwrap();
        let field = find_field(&fields, "dueDate").unwrap();
        assert!(field.is_active);
        assert_dense_order(&fields);
    }

    #[test]
    fn test_protected_type_change_rejected() {
        let mut fields = default_fields();
        let result = update_field(
            &mut fields,
            "field-status",
            FieldConfigUpdate {
                field_type: Some(FieldType::Text),
                ..Default::default()
            },
        );
        assert_eq!(
            result,
            Err(SchemaError::ProtectedField("status".to_string()))
        );
    }

    #[test]
    fn test_delete_rules() {
        let mut fields = default_fields();
        let mut tasks = Vec::new();

        // Core fields cannot be deleted
        assert!(matches!(
            delete_field(&mut fields, &mut tasks, "field-title"),
            Err(SchemaError::ProtectedField(_))
        ));
        assert!(matches!(
            delete_field(&mut fields, &mut tasks, "field-dueDate"),
            Err(SchemaError::NotCustom(_))
        ));

        // Required custom fields cannot be deleted until un-required
        add_custom_field(&mut fields, custom_input("Severity")).unwrap();
        set_required(&mut fields, "severity", true).unwrap();
        assert!(matches!(
            delete_field(&mut fields, &mut tasks, "severity"),
            Err(SchemaError::RequiredField(_))
        ));

        set_required(&mut fields, "severity", false).unwrap();
        let deleted = delete_field(&mut fields, &mut tasks, "severity").unwrap();
        assert_eq!(deleted.key, "severity");
        assert_dense_order(&fields);
    }

    #[test]
    fn test_reorder_active_fields() {
        let mut fields = default_fields();
        let mut active_ids: Vec<String> = {
            let mut active: Vec<&FieldConfig> = fields.iter().filter(|f| f.is_active).collect();
            active.sort_by_key(|f| f.order);
            active.iter().map(|f| f.id.clone()).collect()
        };
        active_ids.reverse();

        reorder(&mut fields, &active_ids);
        assert_dense_order(&fields);

        let first_active = fields
            .iter()
            .filter(|f| f.is_active)
            .min_by_key(|f| f.order)
            .unwrap();
        assert_eq!(first_active.id, active_ids[0]);
    }

    #[test]
    fn test_reorder_tolerates_out_of_range_orders() {
        let mut fields = default_fields();
        // Simulate a hand-edited document with a wild order value
        fields
            .iter_mut()
            .find(|f| f.key == "testers")
            .unwrap()
            .order = usize::MAX;

        let ordered = vec!["field-title".to_string(), "field-status".to_string()];
        reorder(&mut fields, &ordered);
        assert_dense_order(&fields);

        let first_two: Vec<&str> = {
            let mut active: Vec<&FieldConfig> = fields.iter().filter(|f| f.is_active).collect();
            active.sort_by_key(|f| f.order);
            active.iter().take(2).map(|f| f.id.as_str()).collect()
        };
        assert_eq!(first_two, vec!["field-title", "field-status"]);
    }

    #[test]
    fn test_set_repositories_keeps_configs_aligned() {
        let mut fields = default_fields();
        let mut configs = Vec::new();
        set_repositories(
            &mut fields,
            &mut configs,
            vec![
                RepositoryConfig {
                    name: "Frontend".to_string(),
                    base_url: "https://github.com/acme/frontend".to_string(),
                },
                RepositoryConfig {
                    name: "Backend".to_string(),
                    base_url: "https://github.com/acme/backend".to_string(),
                },
            ],
        )
        .unwrap();

        let field = find_field(&fields, "repositories").unwrap();
        let options = field.options.as_ref().unwrap();
        assert_eq!(options.len(), configs.len());
        for (option, config) in options.iter().zip(configs.iter()) {
            assert_eq!(option.value, config.name);
        }
    }
}
