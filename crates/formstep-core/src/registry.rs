//! Step discovery.
//!
//! Steps are found through an ordered list of marking conventions. The first
//! convention that matches at least one element inside the form wins and the
//! others are ignored, even when also present. Discovered steps are stably
//! sorted by their declared number and normalized so that every step carries
//! the `form-step` class.

use log::{debug, info, warn};

use crate::{
    dom::{Document, NodeId, Selector},
    models::{BranchTarget, CompletionState, FieldDescriptor, FieldKind, Step, StepWrapper},
};

/// Class added to every discovered step.
pub const STEP_CLASS: &str = "form-step";

/// Attributes holding a declared step number, in lookup order.
const NUMBER_ATTRS: [&str; 3] = ["data-step", "data-step-number", "data-form-step"];

/// Step marking conventions, in priority order.
pub fn step_strategies() -> Vec<Selector> {
    vec![
        Selector::attr_eq("data-form", "step"),
        Selector::attr("data-step"),
        Selector::attr("data-step-number"),
        Selector::attr("data-form-step"),
        Selector::class(STEP_CLASS),
        Selector::class("step"),
    ]
}

/// Elements shown when the form completes instead of submitting directly.
pub fn final_step_selector() -> Selector {
    Selector::any([
        Selector::attr("data-final-step"),
        Selector::attr("data-success-step"),
        Selector::class("final-step"),
    ])
}

/// Ordered steps of one form.
#[derive(Debug, Clone, Default)]
pub struct StepRegistry {
    steps: Vec<Step>,
    strategy: Option<Selector>,
    final_step: Option<NodeId>,
}

impl StepRegistry {
    /// Discovers the steps inside `form`. Normalization writes attributes and
    /// classes back into the document.
    ///
    /// An empty registry leaves the form inert.
    pub fn discover(document: &mut Document, form: NodeId) -> Self {
        let Some((strategy, mut nodes)) = step_strategies().into_iter().find_map(|selector| {
            let found = document.query_all(form, &selector);
            (!found.is_empty()).then_some((selector, found))
        }) else {
            warn!("No steps found in form; multi-step behavior disabled");
            return Self::default();
        };
        info!("Discovered {} steps using {strategy}", nodes.len());

        // `sort_by_key` is stable: equal numbers keep document order.
        nodes.sort_by_key(|node| step_number(document, *node));

        let final_step = document.query_first(form, &final_step_selector());

        let steps = nodes
            .into_iter()
            .enumerate()
            .map(|(index, node)| {
                normalize(document, node, index);
                build_step(document, node, index)
            })
            .collect();

        Self {
            steps,
            strategy: Some(strategy),
            final_step,
        }
    }

    /// Convention that produced the steps, if any.
    pub fn strategy(&self) -> Option<&Selector> {
        self.strategy.as_ref()
    }

    pub fn final_step(&self) -> Option<NodeId> {
        self.final_step
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Step> {
        self.steps.get_mut(index)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// Index of the first step whose id equals `id`. Ids are not unique; the
    /// first match wins.
    pub fn find_by_id(&self, id: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.id == id)
    }

    /// Index of the step whose element contains `node`.
    pub fn step_containing(&self, document: &Document, node: NodeId) -> Option<usize> {
        self.steps
            .iter()
            .position(|s| document.contains(s.node, node))
    }

    /// The field descriptor for `node`, if it belongs to a step.
    pub fn field(&self, node: NodeId) -> Option<&FieldDescriptor> {
        self.steps
            .iter()
            .flat_map(|s| s.fields.iter())
            .find(|f| f.node == node)
    }
}

impl<'a> IntoIterator for &'a StepRegistry {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Declared step number: the first numeric attribute present, else 1.
pub fn step_number(document: &Document, node: NodeId) -> u32 {
    NUMBER_ATTRS
        .iter()
        .find_map(|attr| document.attr(node, attr))
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(1)
}

fn normalize(document: &mut Document, node: NodeId, index: usize) {
    if !document.has_attr(node, "data-step") && !document.has_attr(node, "data-form") {
        document.set_attr(node, "data-step", (index + 1).to_string());
    }
    document.add_class(node, STEP_CLASS);
}

fn build_step(document: &Document, node: NodeId, index: usize) -> Step {
    let descendants = document.descendants(node);

    let fields: Vec<FieldDescriptor> = descendants
        .iter()
        .filter_map(|d| FieldDescriptor::from_node(document, *d))
        .collect();

    let branch_targets = descendants
        .iter()
        .filter_map(|d| {
            let go_to = document.attr(*d, "data-go-to")?;
            Some(BranchTarget {
                node: *d,
                go_to: go_to.to_string(),
                required_answer: document
                    .attr(*d, "data-answer")
                    .filter(|a| !a.is_empty())
                    .map(String::from),
            })
        })
        .collect();

    let wrappers = descendants
        .iter()
        .filter(|d| is_wrapper(document, **d))
        .filter_map(|d| {
            Some(StepWrapper {
                node: *d,
                answer: document.attr(*d, "data-answer")?.to_string(),
            })
        })
        .collect();

    let id = ["data-answer", "data-go-to"]
        .iter()
        .find_map(|attr| document.attr(node, attr).filter(|v| !v.is_empty()))
        .map(String::from)
        .unwrap_or_else(|| format!("step-{}", index + 1));

    let skip_condition = document
        .attr(node, "data-skip-if")
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(String::from);

    debug!(
        "Step {} (#{id}): {} fields, skip condition {:?}",
        index + 1,
        fields.len(),
        skip_condition
    );

    Step {
        index,
        number: step_number(document, node),
        id,
        node,
        skip_condition,
        branch_targets,
        wrappers,
        fields,
        visible: false,
        completion: CompletionState::Untouched,
    }
}

/// Wrapper blocks carry `data-answer` but are neither controls nor jump
/// triggers.
fn is_wrapper(document: &Document, node: NodeId) -> bool {
    document.has_attr(node, "data-answer")
        && !document.has_attr(node, "data-go-to")
        && FieldKind::of(document, node).is_none()
        && !matches!(document.tag(node), "button" | "input" | "select" | "textarea")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ElementSpec;

    fn build(form: ElementSpec) -> (Document, StepRegistry) {
        let mut doc = Document::from_spec(form);
        let root = doc.root();
        let registry = StepRegistry::discover(&mut doc, root);
        (doc, registry)
    }

    #[test]
    fn test_first_matching_strategy_wins() {
        let (_, registry) = build(
            ElementSpec::new("form")
                .child(ElementSpec::new("div").attr("data-form", "step"))
                .child(ElementSpec::new("div").attr("class", "step"))
                .child(ElementSpec::new("div").attr("data-form", "step")),
        );
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.strategy(),
            Some(&Selector::attr_eq("data-form", "step"))
        );
    }

    #[test]
    fn test_falls_through_to_class_convention() {
        let (doc, registry) = build(
            ElementSpec::new("form")
                .child(ElementSpec::new("section").attr("class", "step"))
                .child(ElementSpec::new("section").attr("class", "step")),
        );
        assert_eq!(registry.len(), 2);
        for (i, step) in registry.iter().enumerate() {
            assert!(doc.has_class(step.node, STEP_CLASS));
            assert_eq!(doc.attr(step.node, "data-step"), Some((i + 1).to_string().as_str()));
        }
    }

    #[test]
    fn test_stable_sort_by_number() {
        let (doc, registry) = build(
            ElementSpec::new("form")
                .child(ElementSpec::new("div").attr("data-step", "3").text("c"))
                .child(ElementSpec::new("div").attr("data-step", "x").text("a"))
                .child(ElementSpec::new("div").attr("data-step", "2").text("b"))
                .child(ElementSpec::new("div").attr("data-step", "").text("a2")),
        );
        let order: Vec<String> = registry.iter().map(|s| doc.text_content(s.node)).collect();
        assert_eq!(order, vec!["a", "a2", "b", "c"]);
        let indices: Vec<usize> = registry.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_step_metadata() {
        let (_, registry) = build(
            ElementSpec::new("form")
                .child(
                    ElementSpec::new("div")
                        .attr("data-form", "step")
                        .attr("data-skip-if", " plan=basic ")
                        .child(
                            ElementSpec::new("input")
                                .attr("type", "radio")
                                .attr("name", "entity")
                                .attr("value", "llc")
                                .attr("data-go-to", "llc")
                                .attr("data-answer", "llc"),
                        )
                        .child(ElementSpec::new("div").attr("data-answer", ""))
                        .child(ElementSpec::new("div").attr("data-answer", "corp"))
                        .child(ElementSpec::new("button").attr("data-answer", "x")),
                )
                .child(
                    ElementSpec::new("div")
                        .attr("data-form", "step")
                        .attr("data-answer", "llc"),
                ),
        );

        let first = registry.get(0).expect("step");
        assert_eq!(first.id, "step-1");
        assert_eq!(first.skip_condition.as_deref(), Some("plan=basic"));
        assert_eq!(first.fields.len(), 1);
        assert_eq!(first.branch_targets.len(), 1);
        assert_eq!(first.branch_targets[0].required_answer.as_deref(), Some("llc"));
        let answers: Vec<&str> = first.wrappers.iter().map(|w| w.answer.as_str()).collect();
        assert_eq!(answers, vec!["", "corp"]);

        assert_eq!(registry.get(1).map(|s| s.id.as_str()), Some("llc"));
        assert_eq!(registry.find_by_id("llc"), Some(1));
        assert_eq!(registry.find_by_id("missing"), None);
    }

    #[test]
    fn test_no_steps_is_inert() {
        let (_, registry) = build(ElementSpec::new("form").child(ElementSpec::new("input")));
        assert!(registry.is_empty());
        assert!(registry.strategy().is_none());
    }

    #[test]
    fn test_final_step_detected() {
        let (doc, registry) = build(
            ElementSpec::new("form")
                .child(ElementSpec::new("div").attr("data-form", "step"))
                .child(ElementSpec::new("div").attr("class", "final-step").text("Thanks")),
        );
        let final_step = registry.final_step().expect("final step");
        assert_eq!(doc.text_content(final_step), "Thanks");
    }
}
