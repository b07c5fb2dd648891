// ABOUTME: Task/field binding layer
// ABOUTME: Reconciles the dynamic schema with concrete task records

pub mod export;
pub mod resolve;
pub mod validate;

pub use export::render_text;
pub use resolve::{default_for, form_view, resolve_value, ResolvedField};
pub use validate::{validate_submission, FieldError};
