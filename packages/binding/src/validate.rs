// ABOUTME: Form submission validation against the active schema
// ABOUTME: Errors are field-scoped so the UI can annotate individual inputs

use taskflow_core::{FieldConfig, Task};

use crate::resolve::resolve_value;

/// Validation error scoped to one field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field_key: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field_key: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError {
            field_key: field_key.into(),
            message: message.into(),
        }
    }
}

/// Check a task against the schema's required fields.
///
/// Only active fields are validated; an empty list means the submission is
/// acceptable.
pub fn validate_submission(fields: &[FieldConfig], task: &Task) -> Vec<FieldError> {
    let mut errors = Vec::new();

    for field in fields.iter().filter(|f| f.is_active && f.is_required) {
        if resolve_value(field, task).is_empty() {
            errors.push(FieldError::new(
                field.key.clone(),
                format!("{} is required", field.label),
            ));
        }
    }

    errors
}
