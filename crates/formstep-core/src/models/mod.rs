//! Data models for steps, fields, captured values and submissions.
//!
//! Display implementations for these models live in
//! [`crate::display::models`], keeping the data structures free of
//! presentation logic.
//!
//! # Examples
//!
//! ```rust
//! use formstep_core::models::{CompletionState, FieldValue};
//!
//! let value = FieldValue::text("basic");
//! assert!(value.equals_text("basic"));
//! assert!(!FieldValue::Bool(true).equals_text("true"));
//!
//! assert_eq!("completed".parse::<CompletionState>(), Ok(CompletionState::Completed));
//! ```

pub mod field;
pub mod status;
pub mod step;
pub mod submission;
pub mod value;

#[cfg(test)]
mod tests;

pub use field::{FieldDescriptor, FieldKind, FIELD_NAME_ATTR};
pub use status::{ButtonRole, CompletionState, Direction};
pub use step::{BranchTarget, Step, StepWrapper};
pub use submission::Submission;
pub use value::FieldValue;
