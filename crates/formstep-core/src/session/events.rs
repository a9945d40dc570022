//! Notifications and tagged outcomes of session operations.

use std::collections::BTreeMap;

use jiff::Timestamp;
use serde::Serialize;

use super::validation::ValidationReport;
use crate::{
    dom::NodeId,
    models::{Direction, FieldValue},
};

/// Payload of a step change notification. Step numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepChange {
    pub form_id: String,
    pub current_step: usize,
    pub previous_step: usize,
    pub total_steps: usize,
    pub direction: Direction,
    /// Store snapshot after the transition
    pub data: BTreeMap<String, FieldValue>,
}

/// Payload of the completion notification raised on submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmittedForm {
    pub form_id: String,
    pub data: BTreeMap<String, FieldValue>,
    pub total_steps: usize,
    pub submitted_at: Timestamp,
    /// False when the form opted out of native submission
    /// (`data-custom-submit`)
    pub native_submit: bool,
}

/// How a form completed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Completion {
    /// A declared final step is shown instead of submitting
    FinalStep { node: NodeId },
    /// The form was submitted
    Submitted(SubmittedForm),
}

/// Why an operation left the navigation state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// The form has no steps
    Inert,
    /// Back navigation with an empty history
    NoHistory,
    /// The target is the current step
    AlreadyCurrent,
    /// The triggering element does not hold the required answer
    AnswerMismatch { expected: String, actual: String },
    /// Repeated click inside the double-click window
    DoubleClick,
    /// The element carries no navigation behavior
    NoAction,
}

/// Tagged result of every public navigation operation.
#[must_use]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NavOutcome {
    /// The current step changed
    Moved(StepChange),
    /// Navigation ran past the last step
    Finished(Completion),
    /// Nothing happened, for the given reason
    Skipped(SkipReason),
    /// The target did not resolve to a step
    NotFound { target: String },
    /// The current step has invalid required fields
    ValidationFailed(ValidationReport),
}

impl NavOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, NavOutcome::Moved(_))
    }

    /// Short tag used in logs and terminal output.
    pub fn kind(&self) -> &'static str {
        match self {
            NavOutcome::Moved(_) => "moved",
            NavOutcome::Finished(_) => "finished",
            NavOutcome::Skipped(_) => "skipped",
            NavOutcome::NotFound { .. } => "not_found",
            NavOutcome::ValidationFailed(_) => "validation_failed",
        }
    }
}

/// Notification raised by a session, drained with
/// [`super::FormSession::take_events`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FormEvent {
    StepChanged(StepChange),
    ValidationFailed(ValidationReport),
    FinalStepShown { node: NodeId },
    Submitted(SubmittedForm),
}
