//! Progress indicators and navigation button visibility.

use serde::Serialize;

use super::FormSession;
use crate::{
    dom::{Document, NodeId, Selector},
    models::ButtonRole,
};

/// Derived progress of a form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    /// 1-based current step
    pub current: usize,
    pub total: usize,
    pub percent: f64,
}

impl Progress {
    pub fn new(current_index: usize, total: usize) -> Self {
        let current = current_index + 1;
        let percent = if total == 0 {
            0.0
        } else {
            current as f64 / total as f64 * 100.0
        };
        Self {
            current,
            total,
            percent,
        }
    }

    /// Counter text, e.g. `2 of 5`.
    pub fn counter_text(&self) -> String {
        format!("{} of {}", self.current, self.total)
    }

    pub fn is_first(&self) -> bool {
        self.current == 1
    }

    pub fn is_last(&self) -> bool {
        self.current == self.total
    }
}

/// State of a step indicator relative to the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorState {
    Completed,
    Active,
    Pending,
}

impl IndicatorState {
    pub fn of(indicator_index: usize, current_index: usize) -> Self {
        match indicator_index.cmp(&current_index) {
            std::cmp::Ordering::Less => IndicatorState::Completed,
            std::cmp::Ordering::Equal => IndicatorState::Active,
            std::cmp::Ordering::Greater => IndicatorState::Pending,
        }
    }
}

fn progress_bars() -> Selector {
    Selector::any([
        Selector::attr("data-progress"),
        Selector::attr("data-step-progress"),
        Selector::class("progress-bar"),
    ])
}

fn indicators() -> Selector {
    Selector::any([
        Selector::attr("data-step-indicator"),
        Selector::class("step-indicator"),
    ])
}

fn counters() -> Selector {
    Selector::any([
        Selector::attr("data-step-counter"),
        Selector::class("step-counter"),
    ])
}

/// Attribute and class conventions of each navigation button role.
pub fn button_selector(role: ButtonRole) -> Selector {
    let (form_value, names): (&str, [&str; 4]) = match role {
        ButtonRole::Next => ("next-btn", ["data-next", "data-step-next", "data-formly-next", "next"]),
        ButtonRole::Prev => ("back-btn", ["data-prev", "data-step-prev", "data-formly-prev", "prev"]),
        ButtonRole::Submit => (
            "submit-btn",
            ["data-submit", "data-step-submit", "data-formly-submit", "submit"],
        ),
    };
    let short = names[3];
    Selector::any([
        Selector::attr_eq("data-form", form_value),
        Selector::attr(names[0]),
        Selector::attr(names[1]),
        Selector::attr(names[2]),
        Selector::class(format!("{short}-btn")),
        Selector::class(format!("step-{short}")),
    ])
}

/// Role of a clicked element, if it is a navigation button.
pub fn detect_role(document: &Document, node: NodeId) -> Option<ButtonRole> {
    [ButtonRole::Next, ButtonRole::Prev, ButtonRole::Submit]
        .into_iter()
        .find(|role| button_selector(*role).matches(document, node))
}

impl FormSession {
    /// Progress of the current step.
    pub fn progress(&self) -> Progress {
        Progress::new(self.state.current(), self.registry.len())
    }

    /// Writes progress bars, indicators and counters into the form.
    pub(super) fn update_progress(&mut self) {
        let progress = self.progress();
        let current = self.state.current();
        let doc = &mut self.document;

        for bar in doc.query_all(self.form, &progress_bars()) {
            doc.set_attr(bar, "style", format!("width: {}%", progress.percent));
            doc.set_attr(bar, "aria-valuenow", progress.percent.to_string());
        }
        for (i, indicator) in doc.query_all(self.form, &indicators()).into_iter().enumerate() {
            let state = IndicatorState::of(i, current);
            doc.remove_class(indicator, "active");
            doc.remove_class(indicator, "completed");
            match state {
                IndicatorState::Active => doc.add_class(indicator, "active"),
                IndicatorState::Completed => doc.add_class(indicator, "completed"),
                IndicatorState::Pending => {}
            }
        }
        for counter in doc.query_all(self.form, &counters()) {
            doc.set_text(counter, progress.counter_text());
        }
    }

    /// Prev hidden on the first step; next hidden and submit shown on the
    /// last step.
    pub(super) fn update_navigation(&mut self) {
        let progress = self.progress();
        let doc = &mut self.document;

        for prev in doc.query_all(self.form, &button_selector(ButtonRole::Prev)) {
            doc.set_displayed(prev, !progress.is_first());
            if progress.is_first() {
                doc.set_attr(prev, "disabled", "");
            } else {
                doc.remove_attr(prev, "disabled");
            }
        }
        for next in doc.query_all(self.form, &button_selector(ButtonRole::Next)) {
            doc.set_displayed(next, !progress.is_last());
        }
        for submit in doc.query_all(self.form, &button_selector(ButtonRole::Submit)) {
            doc.set_displayed(submit, progress.is_last());
        }
    }

    /// Hides every navigation button once the final step is shown.
    pub(super) fn hide_navigation(&mut self) {
        let doc = &mut self.document;
        for role in [ButtonRole::Prev, ButtonRole::Next, ButtonRole::Submit] {
            for button in doc.query_all(self.form, &button_selector(role)) {
                doc.set_displayed(button, false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ElementSpec;

    #[test]
    fn test_progress_derivation() {
        let progress = Progress::new(1, 4);
        assert_eq!(progress.current, 2);
        assert_eq!(progress.percent, 50.0);
        assert_eq!(progress.counter_text(), "2 of 4");
        assert!(!progress.is_first());
        assert!(Progress::new(3, 4).is_last());
    }

    #[test]
    fn test_indicator_states() {
        assert_eq!(IndicatorState::of(0, 1), IndicatorState::Completed);
        assert_eq!(IndicatorState::of(1, 1), IndicatorState::Active);
        assert_eq!(IndicatorState::of(2, 1), IndicatorState::Pending);
    }

    #[test]
    fn test_button_detection() {
        let doc = Document::from_spec(
            ElementSpec::new("form")
                .child(ElementSpec::new("button").attr("data-form", "next-btn"))
                .child(ElementSpec::new("a").attr("class", "btn prev-btn"))
                .child(ElementSpec::new("button").attr("data-formly-submit", ""))
                .child(ElementSpec::new("button").attr("class", "step-next"))
                .child(ElementSpec::new("button").text("Other")),
        );
        let roles: Vec<Option<ButtonRole>> = doc
            .children(doc.root())
            .iter()
            .map(|n| detect_role(&doc, *n))
            .collect();
        assert_eq!(
            roles,
            vec![
                Some(ButtonRole::Next),
                Some(ButtonRole::Prev),
                Some(ButtonRole::Submit),
                Some(ButtonRole::Next),
                None,
            ]
        );
    }
}
