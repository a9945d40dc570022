//! Typed descriptors for form controls.

use serde::{Deserialize, Serialize};

use crate::dom::{Document, NodeId};

/// Attribute overriding the field name used for data capture and summaries.
pub const FIELD_NAME_ATTR: &str = "data-step-field-name";

/// Kind of a form control, resolved once from its tag and `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Number,
    Textarea,
    Radio,
    Checkbox,
    Select,
    Hidden,
    /// Any other input type, kept verbatim
    Other(String),
}

impl FieldKind {
    /// Resolves the kind of `node`, or `None` when it is not a data-bearing
    /// control (buttons, submit/reset inputs, non-controls).
    pub fn of(document: &Document, node: NodeId) -> Option<Self> {
        match document.tag(node) {
            "select" => Some(FieldKind::Select),
            "textarea" => Some(FieldKind::Textarea),
            "input" => {
                let input_type = document
                    .attr(node, "type")
                    .unwrap_or("text")
                    .to_ascii_lowercase();
                match input_type.as_str() {
                    "submit" | "button" | "reset" | "image" => None,
                    "text" | "" => Some(FieldKind::Text),
                    "email" => Some(FieldKind::Email),
                    "tel" => Some(FieldKind::Tel),
                    "number" => Some(FieldKind::Number),
                    "radio" => Some(FieldKind::Radio),
                    "checkbox" => Some(FieldKind::Checkbox),
                    "hidden" => Some(FieldKind::Hidden),
                    _ => Some(FieldKind::Other(input_type)),
                }
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Email => "email",
            FieldKind::Tel => "tel",
            FieldKind::Number => "number",
            FieldKind::Textarea => "textarea",
            FieldKind::Radio => "radio",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Select => "select",
            FieldKind::Hidden => "hidden",
            FieldKind::Other(kind) => kind,
        }
    }
}

/// A form control discovered inside a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Node of the control in the document
    pub node: NodeId,

    /// Capture name: the `name` attribute, else the field-name override
    pub name: Option<String>,

    /// Resolved control kind
    pub kind: FieldKind,

    /// Whether the control carries the `required` attribute
    pub required: bool,
}

impl FieldDescriptor {
    /// Builds a descriptor for `node`, or `None` when it is not a field.
    pub fn from_node(document: &Document, node: NodeId) -> Option<Self> {
        let kind = FieldKind::of(document, node)?;
        let name = document
            .attr(node, "name")
            .filter(|n| !n.is_empty())
            .or_else(|| document.attr(node, FIELD_NAME_ATTR))
            .map(String::from);
        Some(Self {
            node,
            name,
            kind,
            required: document.has_attr(node, "required"),
        })
    }

    /// Name used by the summary projector: the override, else `name`.
    pub fn summary_name<'a>(&'a self, document: &'a Document) -> Option<&'a str> {
        document
            .attr(self.node, FIELD_NAME_ATTR)
            .or(self.name.as_deref())
    }
}
