//! Display implementations for domain models.
//!
//! Markdown output with status icons; kept apart from the model definitions.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{ButtonRole, CompletionState, Direction, FieldKind, FieldValue, Step, Submission};

impl fmt::Display for CompletionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ButtonRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "_(none)_"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Text(s) if s.is_empty() => write!(f, "_(empty)_"),
            FieldValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {}. {} ({})",
            self.position(),
            self.id,
            self.completion.with_icon()
        )?;
        writeln!(f)?;
        writeln!(f, "- Declared number: {}", self.number)?;
        if let Some(condition) = &self.skip_condition {
            writeln!(f, "- Skipped when: `{condition}`")?;
        }

        if !self.fields.is_empty() {
            let fields: Vec<String> = self
                .fields
                .iter()
                .map(|field| {
                    let name = field.name.as_deref().unwrap_or("(unnamed)");
                    let marker = if field.required { "*" } else { "" };
                    format!("{name}{marker} ({})", field.kind)
                })
                .collect();
            writeln!(f, "- Fields: {}", fields.join(", "))?;
        }

        for target in &self.branch_targets {
            match &target.required_answer {
                Some(answer) => writeln!(f, "- Go to `{}` when answered `{answer}`", target.go_to)?,
                None => writeln!(f, "- Go to `{}`", target.go_to)?,
            }
        }

        if !self.wrappers.is_empty() {
            let answers: Vec<&str> = self
                .wrappers
                .iter()
                .map(|w| if w.answer.is_empty() { "(default)" } else { w.answer.as_str() })
                .collect();
            writeln!(f, "- Wrappers: {}", answers.join(", "))?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Submission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Submission {} ({})", self.id, self.form_id)?;
        writeln!(f)?;
        writeln!(f, "- Submitted: {}", LocalDateTime(&self.submitted_at))?;
        writeln!(f, "- Steps: {}", self.total_steps)?;
        writeln!(f, "- Filled: {} of {}", self.filled_count(), self.data.len())?;

        if !self.data.is_empty() {
            writeln!(f, "\n## Data")?;
            writeln!(f)?;
            for (name, value) in &self.data {
                writeln!(f, "- **{name}**: {value}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use jiff::Timestamp;

    use super::*;
    use crate::{
        dom::NodeId,
        models::{BranchTarget, FieldDescriptor, StepWrapper},
    };

    #[test]
    fn test_step_display() {
        let step = Step {
            index: 1,
            number: 2,
            id: "step-2".to_string(),
            node: NodeId(4),
            skip_condition: Some("plan=basic".to_string()),
            branch_targets: vec![BranchTarget {
                node: NodeId(5),
                go_to: "4".to_string(),
                required_answer: Some("yes".to_string()),
            }],
            wrappers: vec![
                StepWrapper {
                    node: NodeId(6),
                    answer: String::new(),
                },
                StepWrapper {
                    node: NodeId(7),
                    answer: "llc".to_string(),
                },
            ],
            fields: vec![FieldDescriptor {
                node: NodeId(8),
                name: Some("email".to_string()),
                kind: FieldKind::Email,
                required: true,
            }],
            visible: false,
            completion: CompletionState::Touched,
        };

        let output = step.to_string();
        assert!(output.starts_with("### 2. step-2 (➤ Touched)"));
        assert!(output.contains("- Skipped when: `plan=basic`"));
        assert!(output.contains("- Fields: email* (email)"));
        assert!(output.contains("- Go to `4` when answered `yes`"));
        assert!(output.contains("- Wrappers: (default), llc"));
    }

    #[test]
    fn test_submission_display() {
        let submission = Submission {
            id: 7,
            form_id: "signup".to_string(),
            data: BTreeMap::from([
                ("name".to_string(), FieldValue::text("Alice")),
                ("company".to_string(), FieldValue::text("")),
            ]),
            total_steps: 3,
            submitted_at: Timestamp::now(),
        };

        let output = submission.to_string();
        assert!(output.starts_with("# Submission 7 (signup)"));
        assert!(output.contains("- Filled: 1 of 2"));
        assert!(output.contains("- **name**: Alice"));
        assert!(output.contains("- **company**: _(empty)_"));
    }
}
