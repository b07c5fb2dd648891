// ABOUTME: Dynamic field schema engine for TaskFlow
// ABOUTME: Field lifecycle, ordering, grouping, option lists, and delete cascades

pub mod cascade;
pub mod defaults;
pub mod engine;
pub mod error;
pub mod groups;
pub mod tags;

// Re-export main entry points
pub use cascade::strip_field_values;
pub use defaults::{default_fields, is_protected, PROTECTED_KEYS};
pub use engine::{
    add_custom_field, delete_field, find_field, normalize_order, reorder, set_active,
    set_repositories, set_required, update_field, FieldConfigInput, FieldConfigUpdate,
};
pub use error::{SchemaError, SchemaResult};
pub use groups::{group_names, rename_group};
pub use tags::{available_tags, delete_tag};
