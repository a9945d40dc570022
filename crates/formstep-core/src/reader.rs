//! Normalized value extraction from form controls.
//!
//! Reading is pure: it never mutates the document, so reading an unchanged
//! control twice yields the same value.

use crate::{
    config::{CheckboxPolicy, SelectReading},
    dom::{Document, NodeId, Selector},
    models::{FieldDescriptor, FieldKind, FieldValue},
};

/// Reads normalized values from controls inside one form.
#[derive(Debug, Clone, Copy)]
pub struct FieldValueReader<'a> {
    document: &'a Document,
    scope: NodeId,
    checkbox: &'a CheckboxPolicy,
    select: SelectReading,
}

impl<'a> FieldValueReader<'a> {
    /// `scope` bounds radio group lookups, normally the form element.
    pub fn new(
        document: &'a Document,
        scope: NodeId,
        checkbox: &'a CheckboxPolicy,
        select: SelectReading,
    ) -> Self {
        Self {
            document,
            scope,
            checkbox,
            select,
        }
    }

    /// Same reader with a different select reading.
    pub fn with_select(self, select: SelectReading) -> Self {
        Self { select, ..self }
    }

    /// Reads a discovered field.
    pub fn read_field(&self, field: &FieldDescriptor) -> FieldValue {
        self.read_kind(field.node, &field.kind)
    }

    /// Reads any element: controls by kind, other elements by their `value`.
    pub fn read(&self, node: NodeId) -> FieldValue {
        match FieldKind::of(self.document, node) {
            Some(kind) => self.read_kind(node, &kind),
            None => FieldValue::Text(self.document.value(node).trim().to_string()),
        }
    }

    fn read_kind(&self, node: NodeId, kind: &FieldKind) -> FieldValue {
        match kind {
            FieldKind::Radio => self.read_radio(node),
            FieldKind::Checkbox => self.read_checkbox(node),
            FieldKind::Select => FieldValue::Text(self.read_select(node, self.select)),
            _ => FieldValue::Text(self.document.value(node).trim().to_string()),
        }
    }

    /// Value of the checked radio sharing `node`'s name, or `Null`.
    fn read_radio(&self, node: NodeId) -> FieldValue {
        let doc = self.document;
        let Some(name) = doc.attr(node, "name") else {
            return if doc.is_checked(node) {
                FieldValue::Text(doc.value(node))
            } else {
                FieldValue::Null
            };
        };
        let group = Selector::tag("input")
            .and(Selector::attr_eq("type", "radio"))
            .and(Selector::attr_eq("name", name));
        doc.query_all(self.scope, &group)
            .into_iter()
            .find(|radio| doc.is_checked(*radio))
            .map(|radio| FieldValue::Text(doc.value(radio)))
            .unwrap_or(FieldValue::Null)
    }

    fn read_checkbox(&self, node: NodeId) -> FieldValue {
        let checked = self.document.is_checked(node);
        match self.checkbox {
            CheckboxPolicy::Boolean => FieldValue::Bool(checked),
            CheckboxPolicy::Sentinel { on_value } if checked => FieldValue::Text(
                self.document
                    .attr(node, "value")
                    .filter(|v| !v.is_empty())
                    .unwrap_or(on_value)
                    .to_string(),
            ),
            CheckboxPolicy::Sentinel { .. } => FieldValue::Text(String::new()),
        }
    }

    /// Label or raw value of the selected option. A selected option with an
    /// empty `value` is a placeholder and reads as the empty string.
    pub fn read_select(&self, node: NodeId, reading: SelectReading) -> String {
        let doc = self.document;
        let Some((_, option)) = doc.selected_option(node) else {
            return String::new();
        };
        let value = doc.option_value(option);
        match reading {
            SelectReading::Value => value,
            SelectReading::Label if value.is_empty() => String::new(),
            SelectReading::Label => doc.text_content(option).trim().to_string(),
        }
    }
}
