//! Required-field validation of a step.

use log::info;
use serde::Serialize;

use super::{Deferred, FormEvent, FormSession};
use crate::{
    dom::{Document, ElementSpec, NodeId, Selector},
    models::{FieldDescriptor, FieldKind, Step},
};

/// Class of the rendered error summary.
pub const ERROR_SUMMARY_CLASS: &str = "validation-error-message";
/// Heading of the rendered error summary.
pub const ERROR_SUMMARY_HEADING: &str = "⚠️ Please complete these fields:";
/// Label used when nothing better is found.
pub const FALLBACK_LABEL: &str = "Required field";

const ERROR_CLASSES: [&str; 2] = ["field-error", "error"];

/// A required field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedField {
    pub node: NodeId,
    pub name: Option<String>,
    pub kind: FieldKind,
    /// Human label shown in the error summary
    pub label: String,
}

/// Result of validating one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// 0-based index of the validated step
    pub step: usize,
    pub valid: bool,
    pub failed: Vec<FailedField>,
}

impl ValidationReport {
    fn passed(step: usize) -> Self {
        Self {
            step,
            valid: true,
            failed: Vec::new(),
        }
    }

    /// Labels of the failed fields, in document order.
    pub fn labels(&self) -> Vec<&str> {
        self.failed.iter().map(|f| f.label.as_str()).collect()
    }
}

/// Required fields of `step` that take part in validation. Fields inside a
/// hidden wrapper are left out.
pub fn active_required_fields<'a>(
    document: &'a Document,
    step: &'a Step,
) -> impl Iterator<Item = &'a FieldDescriptor> {
    step.required_fields().filter(move |field| {
        step.wrappers
            .iter()
            .filter(|w| document.contains(w.node, field.node))
            .all(|w| document.is_displayed(w.node))
    })
}

/// Checks the required fields of `step` without touching the document.
pub fn check_step(document: &Document, step: &Step) -> ValidationReport {
    let failed: Vec<FailedField> = active_required_fields(document, step)
        .filter(|field| !is_field_valid(document, field))
        .map(|field| FailedField {
            node: field.node,
            name: field.name.clone(),
            kind: field.kind.clone(),
            label: field_label(document, field.node),
        })
        .collect();
    ValidationReport {
        step: step.index,
        valid: failed.is_empty(),
        failed,
    }
}

/// Per-kind validity of a required field.
///
/// Radio groups are looked up by name across the whole document, not just
/// the step.
pub fn is_field_valid(document: &Document, field: &FieldDescriptor) -> bool {
    let node = field.node;
    match field.kind {
        FieldKind::Radio => match field.name.as_deref() {
            Some(name) => {
                let group = Selector::tag("input")
                    .and(Selector::attr_eq("type", "radio"))
                    .and(Selector::attr_eq("name", name));
                document
                    .query_all(document.root(), &group)
                    .into_iter()
                    .any(|radio| document.is_checked(radio))
            }
            None => document.is_checked(node),
        },
        FieldKind::Checkbox => document.is_checked(node),
        FieldKind::Email => {
            let value = document.value(node);
            !value.trim().is_empty() && is_email_shaped(&value)
        }
        FieldKind::Select => document
            .selected_option(node)
            .is_some_and(|(_, option)| !document.option_value(option).trim().is_empty()),
        _ => !document.value(node).trim().is_empty(),
    }
}

/// `local@domain.tld`: no whitespace, exactly one `@` with text on both
/// sides, and a dot inside the domain with text on both sides.
pub fn is_email_shaped(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Human label of a field: `label[for=id]`, an enclosing label, a label
/// right before it, then `placeholder`, `name` and a generic fallback. A
/// trailing required marker `*` is dropped.
pub fn field_label(document: &Document, node: NodeId) -> String {
    let label_tag = Selector::tag("label");
    let label = document
        .attr(node, "id")
        .filter(|id| !id.is_empty())
        .and_then(|id| {
            document.query_first(
                document.root(),
                &label_tag.clone().and(Selector::attr_eq("for", id)),
            )
        })
        .or_else(|| document.closest(node, &label_tag))
        .or_else(|| {
            document
                .previous_sibling(node)
                .filter(|prev| label_tag.matches(document, *prev))
        });

    if let Some(label) = label {
        let text = document.text_content(label);
        let text = text.trim();
        return text.strip_suffix('*').unwrap_or(text).trim_end().to_string();
    }

    document
        .attr(node, "placeholder")
        .filter(|p| !p.is_empty())
        .or_else(|| document.attr(node, "name").filter(|n| !n.is_empty()))
        .unwrap_or(FALLBACK_LABEL)
        .to_string()
}

impl FormSession {
    /// Validates step `index`, marking failed fields, rendering the error
    /// summary at the top of the step and focusing the first failure. The
    /// summary is dismissed after `error_dismiss_ms`.
    pub fn validate(&mut self, index: usize) -> ValidationReport {
        let Some(step) = self.registry.get(index) else {
            return ValidationReport::passed(index);
        };
        let report = check_step(&self.document, step);
        let step_node = step.node;
        let required: Vec<NodeId> = step.required_fields().map(|f| f.node).collect();

        // Fields of hidden wrappers are cleared too
        for node in required {
            let failed = report.failed.iter().any(|f| f.node == node);
            self.mark_field(node, failed);
        }

        if !report.valid {
            info!(
                "Step {} failed validation: {}",
                index + 1,
                report.labels().join(", ")
            );
            let summary = self.render_error_summary(step_node, &report);
            self.scheduler
                .schedule(self.config.error_dismiss_ms, Deferred::DismissErrors(summary));
            if let Some(first) = report.failed.first() {
                self.document.focus(first.node);
            }
            self.events.push(FormEvent::ValidationFailed(report.clone()));
        }
        report
    }

    fn mark_field(&mut self, node: NodeId, failed: bool) {
        let doc = &mut self.document;
        for class in ERROR_CLASSES {
            if failed {
                doc.add_class(node, class);
            } else {
                doc.remove_class(node, class);
            }
        }
        if failed {
            doc.set_attr(node, "aria-invalid", "true");
        } else {
            doc.remove_attr(node, "aria-invalid");
        }
    }

    fn render_error_summary(&mut self, step_node: NodeId, report: &ValidationReport) -> NodeId {
        let existing = self
            .document
            .query_all(step_node, &Selector::class(ERROR_SUMMARY_CLASS));
        for node in existing {
            self.document.remove(node);
        }

        let items = report
            .failed
            .iter()
            .map(|f| ElementSpec::new("li").text(f.label.clone()));
        let summary = ElementSpec::new("div")
            .attr("class", ERROR_SUMMARY_CLASS)
            .attr("role", "alert")
            .child(
                ElementSpec::new("div")
                    .attr("class", "error-content")
                    .child(ElementSpec::new("strong").text(ERROR_SUMMARY_HEADING))
                    .child(ElementSpec::new("ul").children(items)),
            );
        self.document.prepend_child(step_node, summary)
    }

    /// The error summary currently rendered in step `index`, if any.
    pub fn error_summary(&self, index: usize) -> Option<NodeId> {
        let step = self.registry.get(index)?;
        self.document
            .query_first(step.node, &Selector::class(ERROR_SUMMARY_CLASS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shape() {
        assert!(is_email_shaped("a@b.co"));
        assert!(is_email_shaped("first.last@sub.example.com"));
        for bad in ["", "a@b", "@b.co", "a@.co", "a@b.", "a b@c.de", "a@b@c.de"] {
            assert!(!is_email_shaped(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_label_resolution_order() {
        let doc = Document::from_spec(
            ElementSpec::new("form")
                .child(ElementSpec::new("label").attr("for", "email").text("Email *"))
                .child(ElementSpec::new("input").attr("id", "email").attr("name", "email"))
                .child(
                    ElementSpec::new("label")
                        .text("Company ")
                        .child(ElementSpec::new("input").attr("name", "company")),
                )
                .child(ElementSpec::new("label").text("City*"))
                .child(ElementSpec::new("input").attr("name", "city"))
                .child(ElementSpec::new("input").attr("name", "zip").attr("placeholder", "ZIP code"))
                .child(ElementSpec::new("input").attr("name", "state"))
                .child(ElementSpec::new("input")),
        );
        let inputs = doc.query_all(doc.root(), &Selector::tag("input"));
        let labels: Vec<String> = inputs.iter().map(|n| field_label(&doc, *n)).collect();
        assert_eq!(
            labels,
            vec!["Email", "Company", "City", "ZIP code", "state", "Required field"]
        );
    }
}
