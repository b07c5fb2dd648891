// ABOUTME: Group management for field configs
// ABOUTME: Groups are free-text labels on fields, not separate entities

use tracing::debug;

use taskflow_core::FieldConfig;

use crate::error::{SchemaError, SchemaResult};

/// Distinct group names in order of first appearance
pub fn group_names(fields: &[FieldConfig]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for field in fields {
        if !names.iter().any(|name| name == &field.group) {
            names.push(field.group.clone());
        }
    }
    names
}

/// Rename a group across every field carrying it.
///
/// The rename is rejected when the new name collides (case-insensitively)
/// with a different existing group; a case-only change of the same group is
/// allowed. Returns how many fields were moved.
pub fn rename_group(fields: &mut [FieldConfig], old: &str, new: &str) -> SchemaResult<usize> {
    let new = new.trim();
    if new.is_empty() {
        return Err(SchemaError::InvalidGroupName(new.to_string()));
    }

    let collides = fields.iter().any(|field| {
        field.group.eq_ignore_ascii_case(new) && !field.group.eq_ignore_ascii_case(old)
    });
    if collides {
        return Err(SchemaError::DuplicateGroup(new.to_string()));
    }

    let mut renamed = 0;
    for field in fields.iter_mut().filter(|f| f.group == old) {
        field.group = new.to_string();
        renamed += 1;
    }
    debug!("Renamed group '{}' -> '{}' on {} fields", old, new, renamed);
    Ok(renamed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_fields;

    #[test]
    fn test_rename_group_moves_all_fields() {
        let mut fields = default_fields();
        let moved = rename_group(&mut fields, "Development", "Engineering").unwrap();
        assert!(moved >= 2);
        assert!(fields.iter().all(|f| f.group != "Development"));
        assert!(group_names(&fields).contains(&"Engineering".to_string()));
    }

    #[test]
    fn test_rename_collision_is_rejected_case_insensitively() {
        let mut fields = default_fields();
        let result = rename_group(&mut fields, "Development", "general");
        assert_eq!(
            result,
            Err(SchemaError::DuplicateGroup("general".to_string()))
        );
        // Original group name retained on all fields
        assert!(fields.iter().any(|f| f.group == "Development"));
        assert!(fields.iter().all(|f| f.group != "general"));
    }

    #[test]
    fn test_case_only_rename_of_same_group_is_allowed() {
        let mut fields = default_fields();
        let moved = rename_group(&mut fields, "Planning", "PLANNING").unwrap();
        assert!(moved >= 1);
        assert!(group_names(&fields).contains(&"PLANNING".to_string()));
    }

    #[test]
    fn test_rename_unknown_group_is_a_no_op() {
        let mut fields = default_fields();
        let before = fields.clone();
        let moved = rename_group(&mut fields, "Nope", "Whatever").unwrap();
        assert_eq!(moved, 0);
        assert_eq!(fields, before);
    }
}
