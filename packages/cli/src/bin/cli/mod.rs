pub mod fields;
pub mod notes;
pub mod tasks;
pub mod utils;
pub mod workspace;
