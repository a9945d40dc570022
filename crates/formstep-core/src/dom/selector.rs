//! Attribute/class selectors over the document tree.
//!
//! Only the handful of selector shapes the form conventions rely on are
//! supported: tag names, classes, attribute presence, attribute equality,
//! compounds of those, and comma-style lists.

use std::fmt;

use super::{Document, NodeId};

/// A CSS-like selector evaluated against a single node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `input`, `select`, `label`, ...
    Tag(String),
    /// `.form-step`
    Class(String),
    /// `[data-step]`
    Attr(String),
    /// `[data-form="step"]`
    AttrEq(String, String),
    /// `input[type="radio"]`: every part must match
    All(Vec<Selector>),
    /// `a, b, c`: any part may match
    Any(Vec<Selector>),
}

impl Selector {
    pub fn tag(name: impl Into<String>) -> Self {
        Selector::Tag(name.into())
    }

    pub fn class(name: impl Into<String>) -> Self {
        Selector::Class(name.into())
    }

    pub fn attr(name: impl Into<String>) -> Self {
        Selector::Attr(name.into())
    }

    pub fn attr_eq(name: impl Into<String>, value: impl Into<String>) -> Self {
        Selector::AttrEq(name.into(), value.into())
    }

    /// Combine two selectors into a compound that requires both.
    pub fn and(self, other: Selector) -> Self {
        match self {
            Selector::All(mut parts) => {
                parts.push(other);
                Selector::All(parts)
            }
            first => Selector::All(vec![first, other]),
        }
    }

    /// Build a selector list.
    pub fn any<I>(selectors: I) -> Self
    where
        I: IntoIterator<Item = Selector>,
    {
        Selector::Any(selectors.into_iter().collect())
    }

    /// Returns true when `node` matches this selector.
    pub fn matches(&self, document: &Document, node: NodeId) -> bool {
        match self {
            Selector::Tag(tag) => document.tag(node).eq_ignore_ascii_case(tag),
            Selector::Class(class) => document.has_class(node, class),
            Selector::Attr(name) => document.has_attr(node, name),
            Selector::AttrEq(name, value) => document.attr(node, name) == Some(value.as_str()),
            Selector::All(parts) => parts.iter().all(|part| part.matches(document, node)),
            Selector::Any(parts) => parts.iter().any(|part| part.matches(document, node)),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Tag(tag) => write!(f, "{tag}"),
            Selector::Class(class) => write!(f, ".{class}"),
            Selector::Attr(name) => write!(f, "[{name}]"),
            Selector::AttrEq(name, value) => write!(f, "[{name}=\"{value}\"]"),
            Selector::All(parts) => {
                for part in parts {
                    write!(f, "{part}")?;
                }
                Ok(())
            }
            Selector::Any(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{part}")?;
                }
                Ok(())
            }
        }
    }
}
