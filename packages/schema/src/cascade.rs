// ABOUTME: Declarative on-delete cleanup rules for removed fields
// ABOUTME: New field types get cascade behavior from this table, not call sites

use taskflow_core::{FieldConfig, FieldType, Task};

/// Cleanup applied to a task when a matching field is deleted from the
/// schema. Returns true if the task carried a value that was removed.
type StripFn = fn(&FieldConfig, &mut Task) -> bool;

struct OnDeleteRule {
    applies: fn(FieldType) -> bool,
    strip: StripFn,
}

fn is_list_type(field_type: FieldType) -> bool {
    matches!(field_type, FieldType::MultiSelect | FieldType::Tags)
}

fn any_type(_: FieldType) -> bool {
    true
}

fn strip_custom_value(field: &FieldConfig, task: &mut Task) -> bool {
    task.custom_fields.remove(&field.key).is_some()
}

/// Rule table, checked in order; the first matching rule wins. List-valued
/// fields are listed explicitly so a future rule can diverge from the scalar
/// default without touching call sites.
const RULES: &[OnDeleteRule] = &[
    OnDeleteRule {
        applies: is_list_type,
        strip: strip_custom_value,
    },
    OnDeleteRule {
        applies: any_type,
        strip: strip_custom_value,
    },
];

/// Strip a deleted field's stored values from every task; returns how many
/// tasks carried a value.
pub fn strip_field_values(field: &FieldConfig, tasks: &mut [Task]) -> usize {
    let strip = RULES
        .iter()
        .find(|rule| (rule.applies)(field.field_type))
        .map(|rule| rule.strip)
        .unwrap_or(strip_custom_value);

    tasks
        .iter_mut()
        .map(|task| strip(field, task))
        .filter(|&stripped| stripped)
        .count()
}
