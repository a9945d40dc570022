//! Answer-keyed wrapper blocks inside a step.

use log::debug;

use super::FormSession;
use crate::{models::StepWrapper, store::FormDataStore};

const VISIBLE_CLASS: &str = "wrapper-visible";
const HIDDEN_CLASS: &str = "wrapper-hidden";

/// Picks the wrapper to show: the first one whose answer matches a stored
/// field value or a recorded navigation target, else the default wrapper
/// (empty answer), else the first wrapper.
pub fn active_wrapper<'a>(
    wrappers: &'a [StepWrapper],
    store: &FormDataStore,
) -> Option<&'a StepWrapper> {
    wrappers
        .iter()
        .filter(|w| !w.answer.is_empty())
        .find(|w| store.any_field_equals(&w.answer) || store.navigation_equals(&w.answer))
        .or_else(|| wrappers.iter().find(|w| w.answer.is_empty()))
        .or_else(|| wrappers.first())
}

impl FormSession {
    /// Shows exactly one wrapper of step `index` and hides the others.
    /// Recomputed on every show.
    pub(super) fn show_wrappers(&mut self, index: usize) {
        let Some(step) = self.registry.get(index) else {
            return;
        };
        if step.wrappers.is_empty() {
            return;
        }
        let active = active_wrapper(&step.wrappers, &self.store).map(|w| w.node);
        let nodes: Vec<_> = step.wrappers.iter().map(|w| w.node).collect();

        for node in nodes {
            let show = Some(node) == active;
            self.document.set_displayed(node, show);
            if show {
                self.document.remove_class(node, HIDDEN_CLASS);
                self.document.add_class(node, VISIBLE_CLASS);
            } else {
                self.document.remove_class(node, VISIBLE_CLASS);
                self.document.add_class(node, HIDDEN_CLASS);
            }
        }
        if let Some(node) = active {
            debug!(
                "Step {} shows wrapper {:?}",
                index + 1,
                self.document.attr(node, "data-answer")
            );
        }
    }
}
