// ABOUTME: Persistence layer for TaskFlow
// ABOUTME: Whole-document JSON blob store, change-notification bus, debounced auto-save

pub mod blob;
pub mod debounce;
pub mod events;

use thiserror::Error;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

// Re-export main entry points
pub use blob::{default_document, DocumentStore};
pub use debounce::{DebouncedSaver, SaveState};
pub use events::{DocumentEvent, EventBus};
