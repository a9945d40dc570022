//! Captured field values.

use serde::{Deserialize, Serialize};

/// Last-known value of a form field.
///
/// Radios store the checked option's value or [`FieldValue::Null`];
/// checkboxes store a boolean or a sentinel string depending on
/// [`crate::config::CheckboxPolicy`]; everything else stores text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Text(String),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// The string payload, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Exact string equality; booleans and nulls never equal a string.
    pub fn equals_text(&self, expected: &str) -> bool {
        self.as_text() == Some(expected)
    }

    /// Rendering used for hidden inputs and summaries: falsy values become
    /// the empty string.
    pub fn to_display_string(&self) -> String {
        match self {
            FieldValue::Null | FieldValue::Bool(false) => String::new(),
            FieldValue::Bool(true) => "true".to_string(),
            FieldValue::Text(s) => s.clone(),
        }
    }

    /// True when the display rendering is blank.
    pub fn is_blank(&self) -> bool {
        self.to_display_string().trim().is_empty()
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}
