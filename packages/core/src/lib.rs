// ABOUTME: Core types, constants, and utilities for TaskFlow
// ABOUTME: Foundational package providing the shared data model across all TaskFlow packages

pub mod constants;
pub mod types;
pub mod utils;

// Re-export main types
pub use types::{
    AppDocument, Attachment, Comment, Company, CompanyData, FieldConfig, FieldOption, FieldType,
    FieldValue, LogEntry, Note, Person, Reminder, RepositoryConfig, SortDirection, Task,
    TaskCreateInput, TaskUpdateInput,
};

// Re-export constants
pub use constants::{
    document_file, taskflow_dir, BIN_RETENTION_DAYS, DEFAULT_COMPANY_NAME, DOCUMENT_VERSION,
    LOG_CAP,
};

// Re-export utilities
pub use utils::generate_entity_id;
