//! Parameter structures for formstep operations.
//!
//! Shared by the core API and its front ends (the CLI argument parser and the
//! session script format) so that each interface adds its own derives or
//! wrappers and converts into these plain structures.
//!
//! ```ignore
//! // In the CLI
//! #[derive(Args)]
//! pub struct ListArgs {
//!     #[arg(long)]
//!     pub form: Option<String>,
//! }
//!
//! impl From<ListArgs> for ListSubmissions {
//!     fn from(args: ListArgs) -> Self {
//!         ListSubmissions { form_id: args.form }
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for listing recorded submissions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListSubmissions {
    /// Restrict the listing to one form
    #[serde(default)]
    pub form_id: Option<String>,
}

/// Parameters for permanently deleting a submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteSubmission {
    /// The ID of the submission to delete
    pub id: u64,
    /// Must be true; deletion is not recoverable
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for an explicit jump.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoTo {
    /// Step number, `step-<N>` or symbolic branch key
    pub target: String,
    /// Answer the source field must currently hold
    #[serde(default)]
    pub answer: Option<String>,
    /// Name of the field the answer is read from
    #[serde(default)]
    pub field: Option<String>,
}

/// Parameters for a skip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Skip {
    /// 1-based step to land on; advance normally when absent
    #[serde(default)]
    pub to: Option<usize>,
}

/// Identifies a control by `name`, optionally narrowed to one `value`
/// (radio options, checkboxes sharing a name).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldRef {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
}

/// Parameters for typing into a field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldInput {
    #[serde(flatten)]
    pub field: FieldRef,
    /// Text typed into the control
    pub text: String,
}
