//! Host event dispatch: clicks, typing, value changes and the clock.

use log::debug;

use super::{progress::detect_role, Deferred, FormSession, NavOutcome, SkipReason};
use crate::{
    dom::{NodeId, Selector},
    models::{ButtonRole, CompletionState, FieldDescriptor, FieldKind},
    params::FieldRef,
};

impl FormSession {
    /// Handles a click on `node`.
    ///
    /// A second click on the same element inside `click_debounce_ms` is
    /// ignored. Navigation buttons dispatch by role; other elements run their
    /// `data-go-to` or `data-skip` declaration.
    pub fn click(&mut self, node: NodeId) -> NavOutcome {
        if self.is_inert() {
            return NavOutcome::Skipped(SkipReason::Inert);
        }
        let now = self.scheduler.now();
        if let Some(last) = self.last_clicks.get(&node) {
            if now.saturating_sub(*last) < self.config.click_debounce_ms {
                debug!("Ignoring repeated click on {node:?}");
                return NavOutcome::Skipped(SkipReason::DoubleClick);
            }
        }
        self.last_clicks.insert(node, now);

        match detect_role(&self.document, node) {
            Some(ButtonRole::Next) => self.go_next(),
            Some(ButtonRole::Prev) => self.go_prev(),
            Some(ButtonRole::Submit) => self.submit(),
            None if self.document.has_attr(node, "data-go-to") => self.go_to_element(node),
            None if self.document.has_attr(node, "data-skip") => self.skip_element(node),
            None => NavOutcome::Skipped(SkipReason::NoAction),
        }
    }

    /// Handles typing into `node`: formats the value, refreshes counters and
    /// summaries, and debounces the store write.
    pub fn input(&mut self, node: NodeId, value: &str) {
        self.document.set_value(node, value);
        self.enhancer.on_input(&mut self.document, node);
        self.touch(node);
        self.project(node);

        let named = FieldDescriptor::from_node(&self.document, node).is_some_and(|f| f.name.is_some());
        if named {
            self.scheduler.schedule_keyed(
                format!("save:{}", node.0),
                self.config.debounce_ms,
                Deferred::SaveField(node),
            );
        }
    }

    /// Handles a committed value change of `node`.
    ///
    /// The value is stored immediately. A checked radio (or any control)
    /// holding its `data-answer` schedules the jump after
    /// `conditional_delay_ms`; a radio carrying `data-skip` skips right away.
    pub fn change(&mut self, node: NodeId) -> NavOutcome {
        self.scheduler.cancel_key(&format!("save:{}", node.0));
        self.save_field(node);
        self.touch(node);
        self.project(node);

        let kind = FieldKind::of(&self.document, node);
        let is_radio = kind == Some(FieldKind::Radio);
        let doc = &self.document;

        if let (Some(_), Some(answer)) = (doc.attr(node, "data-go-to"), doc.attr(node, "data-answer")) {
            if is_radio && !doc.is_checked(node) {
                return NavOutcome::Skipped(SkipReason::NoAction);
            }
            if self.reader().read(node).equals_text(answer) {
                self.scheduler
                    .schedule(self.config.conditional_delay_ms, Deferred::AnswerJump(node));
            }
            return NavOutcome::Skipped(SkipReason::NoAction);
        }

        if is_radio && doc.is_checked(node) && doc.has_attr(node, "data-skip") {
            return self.skip_element(node);
        }
        NavOutcome::Skipped(SkipReason::NoAction)
    }

    /// Checks or unchecks `node` the way a user would, then runs
    /// [`Self::change`]. Checking a radio unchecks the rest of its group.
    pub fn check(&mut self, node: NodeId, checked: bool) -> NavOutcome {
        if FieldKind::of(&self.document, node) == Some(FieldKind::Radio) {
            if let Some(name) = self.document.attr(node, "name").map(String::from) {
                let group = Selector::tag("input")
                    .and(Selector::attr_eq("type", "radio"))
                    .and(Selector::attr_eq("name", name));
                for radio in self.document.query_all(self.form, &group) {
                    self.document.set_checked(radio, false);
                }
            }
        }
        self.document.set_checked(node, checked);
        self.change(node)
    }

    /// Selects the option of `node` whose value or label equals `wanted`,
    /// then runs [`Self::change`].
    pub fn select(&mut self, node: NodeId, wanted: &str) -> NavOutcome {
        if !self.document.select_option(node, wanted) {
            return NavOutcome::NotFound {
                target: wanted.to_string(),
            };
        }
        self.change(node)
    }

    /// Control named `field.name` inside the form, narrowed to the option
    /// carrying `field.value` when given.
    pub fn find_control(&self, field: &FieldRef) -> Option<NodeId> {
        let mut selector = Selector::attr_eq("name", field.name.as_str());
        if let Some(value) = &field.value {
            selector = selector.and(Selector::attr_eq("value", value.as_str()));
        }
        self.document.query_first(self.form, &selector)
    }

    /// Advances the virtual clock by `ms`, running every deferred task that
    /// falls due in order. Returns the outcomes of deferred navigations.
    pub fn advance_time(&mut self, ms: u64) -> Vec<NavOutcome> {
        let deadline = self.scheduler.now().saturating_add(ms);
        let mut outcomes = Vec::new();
        while let Some(task) = self.scheduler.pop_due(deadline) {
            if let Some(outcome) = self.run_deferred(task) {
                outcomes.push(outcome);
            }
        }
        self.scheduler.advance_to(deadline);
        outcomes
    }

    fn run_deferred(&mut self, task: Deferred) -> Option<NavOutcome> {
        match task {
            Deferred::SaveField(node) => {
                self.save_field(node);
                None
            }
            Deferred::AnswerJump(node) => Some(self.go_to_element(node)),
            Deferred::DismissErrors(summary) => {
                if self.document.is_attached(summary) {
                    self.document.remove(summary);
                }
                None
            }
            Deferred::Focus(node) => {
                if self.document.is_rendered(node) {
                    self.document.focus(node);
                }
                None
            }
        }
    }

    /// Stores the current value of a named control.
    fn save_field(&mut self, node: NodeId) {
        let Some(name) = FieldDescriptor::from_node(&self.document, node).and_then(|f| f.name) else {
            return;
        };
        let value = self.reader().read(node);
        debug!("Saving {name} = {value:?}");
        self.store.save(name, value);
    }

    /// Marks the step containing `node` as touched.
    fn touch(&mut self, node: NodeId) {
        let Some(index) = self.registry.step_containing(&self.document, node) else {
            return;
        };
        if let Some(step) = self.registry.get_mut(index) {
            if step.completion == CompletionState::Untouched {
                step.completion = CompletionState::Touched;
            }
        }
    }

    fn project(&mut self, node: NodeId) {
        self.projector
            .field_changed(&mut self.document, self.form, &self.config.checkbox, node);
    }
}
