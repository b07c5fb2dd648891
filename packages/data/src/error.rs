use taskflow_schema::SchemaError;
use taskflow_store::StorageError;
use thiserror::Error;

/// Data layer errors.
///
/// Not-found conditions are not errors here: lookups return `Ok(None)` or
/// `Ok(false)` and leave the document untouched.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),
    #[error("Workspace not found: {0}")]
    UnknownCompany(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

pub type DataResult<T> = Result<T, DataError>;
