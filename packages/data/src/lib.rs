// ABOUTME: Multi-tenant data layer for TaskFlow
// ABOUTME: Workspace-scoped CRUD hiding the whole-document blob from callers

pub mod error;
pub mod fields;
pub mod layer;
pub mod logs;
pub mod notes;
pub mod people;
pub mod reminders;
pub mod tasks;

pub use error::{DataError, DataResult};
pub use layer::{DataLayer, WorkspaceContext};
pub use notes::{NoteCreateInput, NoteUpdateInput};
pub use people::{PersonInput, PersonRole};
pub use reminders::PinnedReminder;
