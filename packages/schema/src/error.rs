use thiserror::Error;

/// Schema engine errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Field not found: {0}")]
    UnknownField(String),
    #[error("Field '{0}' is protected and cannot be changed this way")]
    ProtectedField(String),
    #[error("Field '{0}' is required and must stay active")]
    RequiredField(String),
    #[error("Field '{0}' is not a custom field")]
    NotCustom(String),
    #[error("A field with key '{0}' already exists")]
    DuplicateKey(String),
    #[error("Field label produces an empty key")]
    InvalidKey,
    #[error("A group named '{0}' already exists")]
    DuplicateGroup(String),
    #[error("Invalid group name: '{0}'")]
    InvalidGroupName(String),
}

pub type SchemaResult<T> = Result<T, SchemaError>;
