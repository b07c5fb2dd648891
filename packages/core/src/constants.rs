use std::env;
use std::path::PathBuf;

/// Current version of the persisted document format
pub const DOCUMENT_VERSION: &str = "1.0.0";

/// Name of the workspace created when no document exists yet
pub const DEFAULT_COMPANY_NAME: &str = "My Workspace";

/// Maximum number of activity log entries retained per workspace
pub const LOG_CAP: usize = 2000;

/// Days a soft-deleted task stays in the bin before it is purged
pub const BIN_RETENTION_DAYS: i64 = 30;

/// Get the path to the TaskFlow directory (~/.taskflow)
pub fn taskflow_dir() -> PathBuf {
    // First try HOME environment variable (useful for tests)
    if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".taskflow")
    } else {
        // Fall back to dirs crate for normal usage
        dirs::home_dir()
            .expect("Unable to get home directory")
            .join(".taskflow")
    }
}

/// Get the path to the document file (~/.taskflow/document.json)
pub fn document_file() -> PathBuf {
    taskflow_dir().join("document.json")
}
