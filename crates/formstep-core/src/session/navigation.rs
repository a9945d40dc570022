//! Forward, backward, jump and skip navigation.

use log::{debug, info, warn};

use super::{Completion, Deferred, FormEvent, FormSession, NavOutcome, SkipReason, StepChange};
use crate::{
    condition,
    dom::NodeId,
    models::{CompletionState, Direction},
};

/// Resolution of a `go_to` target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoToTarget {
    /// 1-based step number (`"3"` or `"step-3"`)
    Number(usize),
    /// Symbolic branch key
    Branch(String),
    /// `step-` followed by something other than digits
    Invalid,
}

impl GoToTarget {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let is_number = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
        if is_number(raw) {
            return raw.parse().map(GoToTarget::Number).unwrap_or(GoToTarget::Invalid);
        }
        match raw.strip_prefix("step-") {
            Some(n) if is_number(n) => n.parse().map(GoToTarget::Number).unwrap_or(GoToTarget::Invalid),
            Some(_) => GoToTarget::Invalid,
            None => GoToTarget::Branch(raw.to_string()),
        }
    }
}

impl FormSession {
    /// Advances past the current step.
    ///
    /// Validates the current step (when enabled), flushes its fields into the
    /// store, then lands on the first following step whose skip condition
    /// does not hold. Running past the last step completes the form.
    pub fn go_next(&mut self) -> NavOutcome {
        if self.is_inert() {
            return NavOutcome::Skipped(SkipReason::Inert);
        }
        let current = self.current_step();
        if self.config.validate_on_next {
            let report = self.validate(current);
            if !report.valid {
                return NavOutcome::ValidationFailed(report);
            }
        }
        self.flush_step(current);

        let target = self.next_index(current);
        if target < self.registry.len() {
            self.transition(target, true)
        } else {
            info!("Form {} reached its end", self.form_id);
            self.complete()
        }
    }

    /// Index `go_next` would land on from `from`, or the step count when
    /// every following step is skipped. Pure function of the store and the
    /// registry.
    pub fn next_index(&self, from: usize) -> usize {
        let mut index = from + 1;
        while let Some(step) = self.registry.get(index) {
            let skipped = step
                .skip_condition
                .as_deref()
                .is_some_and(|c| condition::should_skip(c, &self.store));
            if !skipped {
                break;
            }
            debug!("Skipping step {}", index + 1);
            index += 1;
        }
        index
    }

    /// Returns to the previously visited step. Never skip-scans.
    pub fn go_prev(&mut self) -> NavOutcome {
        if self.is_inert() {
            return NavOutcome::Skipped(SkipReason::Inert);
        }
        match self.state.pop() {
            Some(previous) => self.transition(previous, false),
            None => NavOutcome::Skipped(SkipReason::NoHistory),
        }
    }

    /// Jumps to `target`: a 1-based number, `step-<N>`, or a symbolic key
    /// matched against step ids (falling back to [`Self::go_next`]).
    ///
    /// With `required_answer`, the current value of `source` must equal it or
    /// nothing happens. The target is recorded under the reserved navigation
    /// keys of the store.
    pub fn go_to(
        &mut self,
        target: &str,
        required_answer: Option<&str>,
        source: Option<NodeId>,
    ) -> NavOutcome {
        if self.is_inert() {
            return NavOutcome::Skipped(SkipReason::Inert);
        }
        if let Some(expected) = required_answer.filter(|a| !a.is_empty()) {
            let actual = source
                .map(|node| self.reader().read(node).to_display_string())
                .unwrap_or_default();
            if actual != expected {
                debug!("Answer {actual:?} does not match {expected:?}; not navigating");
                return NavOutcome::Skipped(SkipReason::AnswerMismatch {
                    expected: expected.to_string(),
                    actual,
                });
            }
        }

        self.store.record_navigation(target);

        match GoToTarget::parse(target) {
            GoToTarget::Number(number) => match number.checked_sub(1) {
                Some(index) => self.transition(index, true),
                None => NavOutcome::NotFound {
                    target: target.to_string(),
                },
            },
            GoToTarget::Invalid => {
                warn!("Invalid step target {target:?}");
                NavOutcome::NotFound {
                    target: target.to_string(),
                }
            }
            GoToTarget::Branch(key) => {
                self.store.record_branch_target(&key);
                match self.registry.find_by_id(&key) {
                    Some(index) => self.transition(index, true),
                    None => {
                        debug!("Branch {key:?} matches no step id; advancing");
                        self.go_next()
                    }
                }
            }
        }
    }

    /// Runs the `data-go-to` / `data-answer` declaration of `node`.
    pub fn go_to_element(&mut self, node: NodeId) -> NavOutcome {
        let Some(target) = self.document.attr(node, "data-go-to").map(String::from) else {
            return NavOutcome::Skipped(SkipReason::NoAction);
        };
        let answer = self.document.attr(node, "data-answer").map(String::from);
        self.go_to(&target, answer.as_deref(), Some(node))
    }

    /// Jumps to the 1-based step `target`, or advances normally without one.
    pub fn skip(&mut self, target: Option<usize>) -> NavOutcome {
        if self.is_inert() {
            return NavOutcome::Skipped(SkipReason::Inert);
        }
        match target {
            Some(number) => match number.checked_sub(1) {
                Some(index) => self.transition(index, true),
                None => NavOutcome::NotFound {
                    target: number.to_string(),
                },
            },
            None => self.go_next(),
        }
    }

    /// Runs the `data-skip` declaration of `node`.
    pub fn skip_element(&mut self, node: NodeId) -> NavOutcome {
        let raw = self
            .document
            .attr(node, "data-skip")
            .map(|s| s.trim().to_string())
            .unwrap_or_default();
        if raw.is_empty() {
            return self.skip(None);
        }
        match raw.parse::<usize>() {
            Ok(number) => self.skip(Some(number)),
            Err(_) => NavOutcome::NotFound { target: raw },
        }
    }

    /// Writes every named field of step `index` into the store.
    pub(super) fn flush_step(&mut self, index: usize) {
        let Some(step) = self.registry.get(index) else {
            return;
        };
        let reader = self.reader();
        let values: Vec<_> = step
            .fields
            .iter()
            .filter_map(|f| Some((f.name.clone()?, reader.read_field(f))))
            .collect();
        for (name, value) in values {
            self.store.save(name, value);
        }
    }

    /// Moves to `target`, recording history for forward moves when `record`.
    pub(super) fn transition(&mut self, target: usize, record: bool) -> NavOutcome {
        let total = self.registry.len();
        if target >= total {
            warn!("Invalid step index {target}, total steps: {total}");
            return NavOutcome::NotFound {
                target: (target + 1).to_string(),
            };
        }
        let previous = self.current_step();
        if target == previous {
            return NavOutcome::Skipped(SkipReason::AlreadyCurrent);
        }
        let direction = Direction::between(previous, target);
        if direction == Direction::Forward {
            self.mark_completed(previous);
        }

        if let Some(node) = self.registry.get(previous).map(|s| s.node) {
            self.set_step_visible(node, false);
        }
        self.state.move_to(target, record);
        self.show_step(target);
        self.update_progress();
        self.update_navigation();
        self.projector
            .refresh_cards(&mut self.document, self.registry.steps());

        if let Some(first) = self
            .registry
            .get(target)
            .and_then(|s| s.fields.first())
            .map(|f| f.node)
        {
            self.scheduler
                .schedule(self.config.transition_ms, Deferred::Focus(first));
        }

        let change = StepChange {
            form_id: self.form_id.clone(),
            current_step: target + 1,
            previous_step: previous + 1,
            total_steps: total,
            direction,
            data: self.store.snapshot(),
        };
        info!(
            "Step {} -> {} ({})",
            previous + 1,
            target + 1,
            direction.as_str()
        );
        self.events.push(FormEvent::StepChanged(change.clone()));
        NavOutcome::Moved(change)
    }

    /// Touched steps become completed once the user advances past them.
    pub(super) fn mark_completed(&mut self, index: usize) {
        if let Some(step) = self.registry.get_mut(index) {
            if step.completion == CompletionState::Touched {
                step.completion = CompletionState::Completed;
            }
        }
    }

    /// Shows the declared final step, or submits.
    fn complete(&mut self) -> NavOutcome {
        let Some(final_step) = self.registry.final_step() else {
            return self.submit();
        };
        let current = self.current_step();
        self.mark_completed(current);
        if let Some(node) = self.registry.get(current).map(|s| s.node) {
            self.set_step_visible(node, false);
        }
        self.document.set_displayed(final_step, true);
        self.hide_navigation();
        self.projector
            .refresh_cards(&mut self.document, self.registry.steps());
        self.events.push(FormEvent::FinalStepShown { node: final_step });
        NavOutcome::Finished(Completion::FinalStep { node: final_step })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_go_to_target_parsing() {
        assert_eq!(GoToTarget::parse("3"), GoToTarget::Number(3));
        assert_eq!(GoToTarget::parse("step-12"), GoToTarget::Number(12));
        assert_eq!(GoToTarget::parse("step-two"), GoToTarget::Invalid);
        assert_eq!(GoToTarget::parse("step-"), GoToTarget::Invalid);
        assert_eq!(GoToTarget::parse("llc"), GoToTarget::Branch("llc".to_string()));
        assert_eq!(GoToTarget::parse("0"), GoToTarget::Number(0));
    }
}
