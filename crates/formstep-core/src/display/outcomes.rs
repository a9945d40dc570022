//! Display implementations for session outcomes and notifications.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::session::{
    Completion, FormEvent, NavOutcome, SkipReason, StepChange, SubmittedForm, ValidationReport,
};

impl fmt::Display for StepChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Moved {} from step {} to step {} of {}",
            self.direction, self.previous_step, self.current_step, self.total_steps
        )
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid {
            return writeln!(f, "Step {} is valid", self.step + 1);
        }
        writeln!(f, "Step {} has incomplete fields:", self.step + 1)?;
        for field in &self.failed {
            writeln!(f, "- {}", field.label)?;
        }
        Ok(())
    }
}

impl fmt::Display for SubmittedForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Submitted form {} ({} values) at {}",
            self.form_id,
            self.data.len(),
            LocalDateTime(&self.submitted_at)
        )?;
        if !self.native_submit {
            writeln!(f, "Native submission suppressed")?;
        }
        Ok(())
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Inert => write!(f, "form has no steps"),
            SkipReason::NoHistory => write!(f, "no previous step"),
            SkipReason::AlreadyCurrent => write!(f, "already on that step"),
            SkipReason::AnswerMismatch { expected, actual } => {
                write!(f, "answer {actual:?} does not match {expected:?}")
            }
            SkipReason::DoubleClick => write!(f, "repeated click ignored"),
            SkipReason::NoAction => write!(f, "no navigation attached"),
        }
    }
}

impl fmt::Display for NavOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavOutcome::Moved(change) => write!(f, "{change}"),
            NavOutcome::Finished(Completion::FinalStep { .. }) => {
                writeln!(f, "Final step shown")
            }
            NavOutcome::Finished(Completion::Submitted(form)) => write!(f, "{form}"),
            NavOutcome::Skipped(reason) => writeln!(f, "Nothing to do: {reason}"),
            NavOutcome::NotFound { target } => writeln!(f, "No step matches `{target}`"),
            NavOutcome::ValidationFailed(report) => write!(f, "{report}"),
        }
    }
}

impl fmt::Display for FormEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormEvent::StepChanged(change) => write!(f, "{change}"),
            FormEvent::ValidationFailed(report) => write!(f, "{report}"),
            FormEvent::FinalStepShown { .. } => writeln!(f, "Final step shown"),
            FormEvent::Submitted(form) => write!(f, "{form}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::{
        dom::NodeId,
        models::{Direction, FieldKind},
        session::FailedField,
    };

    #[test]
    fn test_step_change_display() {
        let outcome = NavOutcome::Moved(StepChange {
            form_id: "signup".to_string(),
            current_step: 3,
            previous_step: 1,
            total_steps: 4,
            direction: Direction::Forward,
            data: BTreeMap::new(),
        });
        assert_eq!(outcome.to_string(), "Moved forward from step 1 to step 3 of 4\n");
    }

    #[test]
    fn test_validation_display() {
        let report = ValidationReport {
            step: 1,
            valid: false,
            failed: vec![FailedField {
                node: NodeId(3),
                name: Some("company".to_string()),
                kind: FieldKind::Text,
                label: "Company".to_string(),
            }],
        };
        let output = NavOutcome::ValidationFailed(report).to_string();
        assert_eq!(output, "Step 2 has incomplete fields:\n- Company\n");
    }

    #[test]
    fn test_skip_display() {
        let outcome = NavOutcome::Skipped(SkipReason::AnswerMismatch {
            expected: "yes".to_string(),
            actual: "no".to_string(),
        });
        assert_eq!(
            outcome.to_string(),
            "Nothing to do: answer \"no\" does not match \"yes\"\n"
        );
    }
}
