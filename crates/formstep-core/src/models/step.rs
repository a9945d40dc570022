//! Step model definition and related functionality.

use serde::{Deserialize, Serialize};

use super::{CompletionState, FieldDescriptor};
use crate::dom::NodeId;

/// Conditional navigation trigger scoped to a step (`data-go-to`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchTarget {
    /// Element carrying the attribute
    pub node: NodeId,

    /// Raw target: absolute number, `step-<N>`, or a symbolic key
    pub go_to: String,

    /// Answer the triggering element must hold (`data-answer`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_answer: Option<String>,
}

/// Mutually exclusive content block inside a step, keyed by a prior answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepWrapper {
    pub node: NodeId,

    /// Declared answer; empty marks the default wrapper
    pub answer: String,
}

/// One screen of a multi-step form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Position in the sorted step sequence (0-indexed)
    pub index: usize,

    /// Declared step number used for ordering (defaults to 1)
    pub number: u32,

    /// Identifier matched by symbolic `go_to` targets
    pub id: String,

    /// Step element in the document
    pub node: NodeId,

    /// Raw `data-skip-if` condition, parsed lazily
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_condition: Option<String>,

    /// Conditional jump triggers inside the step
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub branch_targets: Vec<BranchTarget>,

    /// Answer-keyed wrapper blocks inside the step
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub wrappers: Vec<StepWrapper>,

    /// Form controls inside the step
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDescriptor>,

    /// Whether the step is currently shown
    pub visible: bool,

    /// Completion state used by the summary projector
    pub completion: CompletionState,
}

impl Step {
    /// 1-based position, as shown to users and used by absolute targets.
    pub fn position(&self) -> usize {
        self.index + 1
    }

    /// Fields marked `required`.
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.required)
    }
}
