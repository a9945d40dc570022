//! Owned element tree standing in for the host page.
//!
//! Form documents are described as nested [`ElementSpec`] values (usually
//! loaded from JSON) and flattened into an arena-backed [`Document`]. Nodes
//! are addressed by [`NodeId`]; ids are only meaningful for the document that
//! produced them.
//!
//! Form control state lives in attributes, the same way a serialized page
//! would carry it:
//!
//! - `value` holds the current value of inputs and textareas
//! - `checked` (presence) marks checked radios and checkboxes
//! - `selected` (presence) marks the selected `option` of a `select`
//!
//! ```rust
//! use formstep_core::dom::{Document, ElementSpec, Selector};
//!
//! let spec = ElementSpec::new("form")
//!     .attr("data-form-id", "signup")
//!     .child(ElementSpec::new("div").attr("data-form", "step"))
//!     .child(ElementSpec::new("div").attr("data-form", "step"));
//!
//! let doc = Document::from_spec(spec);
//! let steps = doc.query_all(doc.root(), &Selector::attr_eq("data-form", "step"));
//! assert_eq!(steps.len(), 2);
//! ```

use std::{collections::BTreeMap, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{IoResultExt, Result};

pub mod selector;


pub use selector::Selector;

/// Index of a node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// Serializable description of an element and its subtree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementSpec {
    /// Lower-case tag name
    #[serde(default = "default_tag")]
    pub tag: String,

    /// Element attributes, including `class`
    #[serde(default, alias = "attrs", skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,

    /// Direct text content
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,

    /// Child elements in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementSpec>,
}

fn default_tag() -> String {
    "div".to_string()
}

impl ElementSpec {
    /// Creates an element with the given tag and no attributes.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Adds an attribute.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Sets the text content.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Appends a child element.
    pub fn child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }

    /// Appends several child elements.
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = ElementSpec>,
    {
        self.children.extend(children);
        self
    }
}

/// A node of the arena.
#[derive(Debug, Clone)]
pub struct Node {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub text: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// Arena-backed element tree with a focus pointer.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    focused: Option<NodeId>,
}

impl Document {
    /// Flattens an element tree into a document.
    pub fn from_spec(spec: ElementSpec) -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            focused: None,
        };
        doc.root = doc.insert(spec, None);
        doc
    }

    /// Parses a JSON element tree.
    pub fn from_json(json: &str) -> Result<Self> {
        let spec: ElementSpec = serde_json::from_str(json)?;
        Ok(Self::from_spec(spec))
    }

    /// Reads and parses a JSON element tree from disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).fs_context(path)?;
        Self::from_json(&json)
    }

    fn insert(&mut self, spec: ElementSpec, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            tag: spec.tag.to_ascii_lowercase(),
            attributes: spec.attributes,
            text: spec.text,
            parent,
            children: Vec::new(),
        });
        for child in spec.children {
            let child_id = self.insert(child, Some(id));
            self.nodes[id.0].children.push(child_id);
        }
        id
    }

    /// The root element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Borrow a node.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn tag(&self, id: NodeId) -> &str {
        &self.node(id).tag
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id).attributes.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.node(id).attributes.contains_key(name)
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        self.node_mut(id)
            .attributes
            .insert(name.to_string(), value.into());
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) {
        self.node_mut(id).attributes.remove(name);
    }

    /// Iterates the whitespace-separated entries of the `class` attribute.
    pub fn classes(&self, id: NodeId) -> impl Iterator<Item = &str> {
        self.attr(id, "class").unwrap_or_default().split_whitespace()
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.classes(id).any(|c| c == class)
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if self.has_class(id, class) {
            return;
        }
        let mut classes: Vec<String> = self.classes(id).map(String::from).collect();
        classes.push(class.to_string());
        self.set_attr(id, "class", classes.join(" "));
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if !self.has_class(id, class) {
            return;
        }
        let classes: Vec<String> = self
            .classes(id)
            .filter(|c| *c != class)
            .map(String::from)
            .collect();
        self.set_attr(id, "class", classes.join(" "));
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// All descendants of `id` in document (pre-)order, excluding `id`.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Descendants of `scope` matching `selector`, in document order.
    pub fn query_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|id| selector.matches(self, *id))
            .collect()
    }

    /// First descendant of `scope` matching `selector`.
    pub fn query_first(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.query_all(scope, selector).into_iter().next()
    }

    /// Nearest inclusive ancestor of `id` matching `selector`.
    pub fn closest(&self, id: NodeId, selector: &Selector) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(node) = current {
            if selector.matches(self, node) {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }

    /// Returns true when `ancestor` is `id` or one of its ancestors.
    pub fn contains(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// The element sibling immediately before `id`.
    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|s| *s == id)?;
        pos.checked_sub(1).map(|p| siblings[p])
    }

    /// Concatenated text of the node and its descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut text = self.node(id).text.clone();
        for child in self.descendants(id) {
            text.push_str(&self.node(child).text);
        }
        text
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        self.node_mut(id).text = text.into();
    }

    /// Appends a new subtree under `parent` and returns its root.
    pub fn append_child(&mut self, parent: NodeId, spec: ElementSpec) -> NodeId {
        let id = self.insert(spec, Some(parent));
        self.node_mut(parent).children.push(id);
        id
    }

    /// Inserts a new subtree as the first child of `parent`.
    pub fn prepend_child(&mut self, parent: NodeId, spec: ElementSpec) -> NodeId {
        let id = self.insert(spec, Some(parent));
        self.node_mut(parent).children.insert(0, id);
        id
    }

    /// Inserts a new subtree immediately before `reference`. Falls back to
    /// appending under the root when `reference` is detached.
    pub fn insert_before(&mut self, reference: NodeId, spec: ElementSpec) -> NodeId {
        let parent = self.parent(reference).unwrap_or(self.root);
        let id = self.insert(spec, Some(parent));
        let siblings = &mut self.node_mut(parent).children;
        let pos = siblings
            .iter()
            .position(|s| *s == reference)
            .unwrap_or(siblings.len());
        siblings.insert(pos, id);
        id
    }

    /// Detaches `id` from the tree. The node stays in the arena but is no
    /// longer reachable from the root.
    pub fn remove(&mut self, id: NodeId) {
        if let Some(parent) = self.parent(id) {
            self.node_mut(parent).children.retain(|c| *c != id);
        }
        self.node_mut(id).parent = None;
        if self.focused.is_some_and(|f| !self.is_attached(f)) {
            self.focused = None;
        }
    }

    /// Returns true when `id` is reachable from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.contains(self.root, id)
    }

    pub fn focus(&mut self, id: NodeId) {
        self.focused = Some(id);
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Sets an inline `display` style.
    pub fn set_displayed(&mut self, id: NodeId, displayed: bool) {
        let style = if displayed { "display: block" } else { "display: none" };
        self.set_attr(id, "style", style);
    }

    /// False only when an inline `display: none` style is present.
    pub fn is_displayed(&self, id: NodeId) -> bool {
        self.attr(id, "style")
            .map(|s| !s.replace(' ', "").contains("display:none"))
            .unwrap_or(true)
    }

    /// True when `id` is attached and neither it nor any ancestor is hidden.
    pub fn is_rendered(&self, id: NodeId) -> bool {
        if !self.is_attached(id) {
            return false;
        }
        let mut cursor = Some(id);
        while let Some(node) = cursor {
            if !self.is_displayed(node) {
                return false;
            }
            cursor = self.parent(node);
        }
        true
    }

    // Form control state

    /// Raw `value` of an input or textarea (textarea falls back to its text).
    pub fn value(&self, id: NodeId) -> String {
        match self.attr(id, "value") {
            Some(v) => v.to_string(),
            None if self.tag(id) == "textarea" => self.node(id).text.clone(),
            None => String::new(),
        }
    }

    pub fn set_value(&mut self, id: NodeId, value: impl Into<String>) {
        self.set_attr(id, "value", value);
    }

    pub fn is_checked(&self, id: NodeId) -> bool {
        self.has_attr(id, "checked")
    }

    pub fn set_checked(&mut self, id: NodeId, checked: bool) {
        if checked {
            self.set_attr(id, "checked", "");
        } else {
            self.remove_attr(id, "checked");
        }
    }

    /// `option` children of a select, in order.
    pub fn options(&self, select: NodeId) -> Vec<NodeId> {
        self.query_all(select, &Selector::tag("option"))
    }

    /// Index and node of the selected option; the first option when none is
    /// marked.
    pub fn selected_option(&self, select: NodeId) -> Option<(usize, NodeId)> {
        let options = self.options(select);
        options
            .iter()
            .position(|o| self.has_attr(*o, "selected"))
            .or(if options.is_empty() { None } else { Some(0) })
            .map(|i| (i, options[i]))
    }

    /// Value of an option: its `value` attribute, else its text.
    pub fn option_value(&self, option: NodeId) -> String {
        self.attr(option, "value")
            .map(String::from)
            .unwrap_or_else(|| self.text_content(option).trim().to_string())
    }

    /// Selects the first option whose value or label equals `wanted`.
    /// Returns false when no option matches.
    pub fn select_option(&mut self, select: NodeId, wanted: &str) -> bool {
        let options = self.options(select);
        let target = options.iter().copied().find(|o| {
            self.option_value(*o) == wanted || self.text_content(*o).trim() == wanted
        });
        let Some(target) = target else {
            return false;
        };
        for option in options {
            self.remove_attr(option, "selected");
        }
        self.set_attr(target, "selected", "");
        true
    }
}
