//! Final validation, hidden-input injection and the completion event.

use std::collections::BTreeMap;

use jiff::Timestamp;
use log::{info, warn};

use super::{Completion, FormEvent, FormSession, NavOutcome, SkipReason, SubmittedForm};
use crate::{
    dom::{ElementSpec, NodeId, Selector},
    models::FieldValue,
};

/// Marker of inputs created at submit time.
pub const INJECTED_ATTR: &str = "data-injected-input";
/// Forms carrying this attribute handle submission themselves.
pub const CUSTOM_SUBMIT_ATTR: &str = "data-custom-submit";

impl FormSession {
    /// Submits the form.
    ///
    /// The current step is validated first. On success every stored value is
    /// written into a hidden input (unless a rendered control already carries
    /// that name), the store is mirrored when configured, and a
    /// [`FormEvent::Submitted`] is raised.
    pub fn submit(&mut self) -> NavOutcome {
        if self.is_inert() {
            return NavOutcome::Skipped(SkipReason::Inert);
        }
        let current = self.current_step();
        let report = self.validate(current);
        if !report.valid {
            return NavOutcome::ValidationFailed(report);
        }
        self.flush_step(current);
        self.mark_completed(current);
        self.projector
            .refresh_cards(&mut self.document, self.registry.steps());

        let data = self.store.snapshot();
        let injected = self.inject_hidden_inputs(&data);
        let submitted = SubmittedForm {
            form_id: self.form_id.clone(),
            data,
            total_steps: self.registry.len(),
            submitted_at: Timestamp::now(),
            native_submit: !self.document.has_attr(self.form, CUSTOM_SUBMIT_ATTR),
        };

        if self.config.mirror_storage {
            match serde_json::to_string(&submitted.data) {
                Ok(json) => {
                    self.storage.insert(self.config.mirror_key.clone(), json);
                }
                Err(e) => warn!("Failed to mirror form data: {e}"),
            }
        }

        info!(
            "Form {} submitted with {} values ({injected} hidden inputs)",
            self.form_id,
            submitted.data.len()
        );
        self.events.push(FormEvent::Submitted(submitted.clone()));
        NavOutcome::Finished(Completion::Submitted(submitted))
    }

    /// Replaces previously injected inputs with one hidden input per stored
    /// value. Returns the number of inputs created.
    fn inject_hidden_inputs(&mut self, data: &BTreeMap<String, FieldValue>) -> usize {
        for old in self.document.query_all(self.form, &Selector::attr(INJECTED_ATTR)) {
            self.document.remove(old);
        }

        let mut created = 0;
        for (name, value) in data {
            if self.has_rendered_control(name) {
                continue;
            }
            self.document.append_child(
                self.form,
                ElementSpec::new("input")
                    .attr("type", "hidden")
                    .attr("name", name.clone())
                    .attr("value", value.to_display_string())
                    .attr(INJECTED_ATTR, "true"),
            );
            created += 1;
        }
        created
    }

    fn has_rendered_control(&self, name: &str) -> bool {
        self.document
            .query_all(self.form, &Selector::attr_eq("name", name))
            .into_iter()
            .any(|node: NodeId| self.document.is_rendered(node))
    }

    /// Hidden inputs injected by the last submission.
    pub fn injected_inputs(&self) -> Vec<NodeId> {
        self.document
            .query_all(self.form, &Selector::attr(INJECTED_ATTR))
    }
}
