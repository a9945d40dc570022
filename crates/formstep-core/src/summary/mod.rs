//! Read-only recap of captured values.
//!
//! Summary cards are elements carrying `data-summary-type` (and usually
//! `data-summary-number` / `data-summary-subtype`); inside them, nodes with
//! `data-summary-field` mirror the field of the same
//! `data-step-field-name`. A field is bound to cards through the
//! `data-step-type`, `data-step-number` and `data-step-subtype` attributes of
//! its nearest container. Matching degrades gracefully: exact key, then
//! without the subtype, then on the step type alone.
//!
//! Cards start hidden and are revealed once their owning step is
//! [`CompletionState::Completed`] and at least one mirrored field is
//! non-empty.

use log::debug;

use crate::{
    config::{CheckboxPolicy, EmptySummary, SelectReading},
    dom::{Document, NodeId, Selector},
    models::{CompletionState, FieldKind, Step, FIELD_NAME_ATTR},
    reader::FieldValueReader,
};

pub mod phone;

#[cfg(test)]
mod tests;

pub use phone::{NoPhoneService, PhoneError, PhoneFormatter};

/// Field name of the phone number in a phone pair.
pub const PHONE_FIELD: &str = "phone";
/// Field name of the country code in a phone pair.
pub const COUNTRY_CODE_FIELD: &str = "countryCode";

const CARD_TYPE_ATTR: &str = "data-summary-type";
const CARD_NUMBER_ATTR: &str = "data-summary-number";
const CARD_SUBTYPE_ATTR: &str = "data-summary-subtype";
const SUMMARY_FIELD_ATTR: &str = "data-summary-field";
/// Marks summary nodes whose mirrored value is empty.
const EMPTY_MARKER_ATTR: &str = "data-summary-empty";

/// Field names whose summary node may carry a different name.
const FIELD_ALIASES: [(&str, &str); 1] = [("taxCollection", "taxClassification")];

/// Compound key binding a field container to summary cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryKey {
    pub step_type: String,
    pub step_number: String,
    pub step_subtype: String,
}

impl SummaryKey {
    /// Key of the nearest `data-step-type` container of `node`.
    pub fn of(document: &Document, node: NodeId) -> Option<(NodeId, Self)> {
        let container = document.closest(node, &Selector::attr("data-step-type"))?;
        let attr = |name: &str, default: &str| {
            document
                .attr(container, name)
                .unwrap_or(default)
                .to_string()
        };
        Some((
            container,
            Self {
                step_type: attr("data-step-type", ""),
                step_number: attr("data-step-number", "1"),
                step_subtype: attr("data-step-subtype", ""),
            },
        ))
    }

    fn card_selectors(&self) -> Vec<Selector> {
        let by_number = Selector::attr_eq(CARD_TYPE_ATTR, &self.step_type)
            .and(Selector::attr_eq(CARD_NUMBER_ATTR, &self.step_number));
        let mut tiers = Vec::new();
        if !self.step_subtype.is_empty() {
            tiers.push(
                by_number
                    .clone()
                    .and(Selector::attr_eq(CARD_SUBTYPE_ATTR, &self.step_subtype)),
            );
        }
        tiers.push(by_number);
        tiers.push(Selector::attr_eq(CARD_TYPE_ATTR, &self.step_type));
        tiers
    }
}

/// Mirrors field values into summary cards.
#[derive(Debug)]
pub struct SummaryProjector {
    empty: EmptySummary,
    formatter: Box<dyn PhoneFormatter>,
}

impl Default for SummaryProjector {
    fn default() -> Self {
        Self::new(EmptySummary::default(), Box::new(NoPhoneService))
    }
}

impl SummaryProjector {
    pub fn new(empty: EmptySummary, formatter: Box<dyn PhoneFormatter>) -> Self {
        Self { empty, formatter }
    }

    /// Hides every summary card in the document.
    pub fn hide_cards(&self, document: &mut Document) {
        let cards = document.query_all(document.root(), &Selector::attr(CARD_TYPE_ATTR));
        debug!("Hiding {} summary cards", cards.len());
        for card in cards {
            document.set_displayed(card, false);
        }
    }

    /// Mirrors the value of `field` into its summary nodes and returns the
    /// nodes written. Fields without `data-step-field-name` are ignored.
    pub fn field_changed(
        &self,
        document: &mut Document,
        scope: NodeId,
        checkbox: &CheckboxPolicy,
        field: NodeId,
    ) -> Vec<NodeId> {
        let Some(name) = document.attr(field, FIELD_NAME_ATTR).map(String::from) else {
            return Vec::new();
        };
        if FieldKind::of(document, field).is_none() {
            return Vec::new();
        }

        let (source, name, value) = if name == PHONE_FIELD || name == COUNTRY_CODE_FIELD {
            match self.compose_phone(document, scope, checkbox, field) {
                Some((phone, value)) => (phone, PHONE_FIELD.to_string(), value),
                None => return Vec::new(),
            }
        } else {
            let reader = FieldValueReader::new(document, scope, checkbox, SelectReading::Label);
            let value = reader.read(field).to_display_string();
            (field, name, value)
        };

        let targets = find_summary_nodes(document, source, &name);
        for node in &targets {
            self.write(document, *node, &value);
        }
        if !targets.is_empty() && !value.is_empty() {
            debug!("Summary {name} updated to {value:?}");
        }
        targets
    }

    /// Phone node and composed value, once both halves of the pair are
    /// present in the field's container and the country has a value.
    fn compose_phone(
        &self,
        document: &Document,
        scope: NodeId,
        checkbox: &CheckboxPolicy,
        field: NodeId,
    ) -> Option<(NodeId, String)> {
        let (container, _) = SummaryKey::of(document, field)?;
        let phone = document.query_first(
            container,
            &Selector::attr_eq(FIELD_NAME_ATTR, PHONE_FIELD),
        )?;
        let country = document.query_first(
            container,
            &Selector::attr_eq(FIELD_NAME_ATTR, COUNTRY_CODE_FIELD),
        )?;
        let reader = FieldValueReader::new(document, scope, checkbox, SelectReading::Value);
        let phone_value = reader.read(phone).to_display_string();
        let country_value = reader.read(country).to_display_string();
        // A number without its country is not composed yet.
        if !phone_value.trim().is_empty() && country_value.trim().is_empty() {
            return None;
        }
        Some((
            phone,
            phone::compose(self.formatter.as_ref(), &phone_value, &country_value),
        ))
    }

    fn write(&self, document: &mut Document, node: NodeId, value: &str) {
        if value.trim().is_empty() {
            let text = match &self.empty {
                EmptySummary::Blank => String::new(),
                EmptySummary::Placeholder(text) => text.clone(),
            };
            document.set_text(node, text);
            document.set_attr(node, EMPTY_MARKER_ATTR, "true");
        } else {
            document.set_text(node, value);
            document.remove_attr(node, EMPTY_MARKER_ATTR);
        }
    }

    /// Shows each card whose owning step is completed and which mirrors at
    /// least one non-empty value; hides the rest. Cards without an owning
    /// step only need content. Returns the visible cards.
    pub fn refresh_cards(&self, document: &mut Document, steps: &[Step]) -> Vec<NodeId> {
        let cards = document.query_all(document.root(), &Selector::attr(CARD_TYPE_ATTR));
        let mut visible = Vec::new();
        for card in cards {
            let completed = owning_step(document, card, steps)
                .map(|step| step.completion == CompletionState::Completed)
                .unwrap_or(true);
            let show = completed && has_content(document, card);
            document.set_displayed(card, show);
            if show {
                visible.push(card);
            }
        }
        visible
    }
}

/// Summary nodes mirroring `field_name` for the container of `source`.
pub fn find_summary_nodes(document: &Document, source: NodeId, field_name: &str) -> Vec<NodeId> {
    let Some((_, key)) = SummaryKey::of(document, source) else {
        return Vec::new();
    };
    let cards = key
        .card_selectors()
        .into_iter()
        .map(|selector| document.query_all(document.root(), &selector))
        .find(|cards| !cards.is_empty())
        .unwrap_or_default();

    let alias = FIELD_ALIASES
        .iter()
        .find(|(from, _)| *from == field_name)
        .map(|(_, to)| *to);

    cards
        .into_iter()
        .filter_map(|card| {
            document
                .query_first(card, &Selector::attr_eq(SUMMARY_FIELD_ATTR, field_name))
                .or_else(|| {
                    alias.and_then(|alias| {
                        document.query_first(card, &Selector::attr_eq(SUMMARY_FIELD_ATTR, alias))
                    })
                })
        })
        .collect()
}

fn owning_step<'a>(document: &Document, card: NodeId, steps: &'a [Step]) -> Option<&'a Step> {
    let step_type = document.attr(card, CARD_TYPE_ATTR)?;
    let number = document.attr(card, CARD_NUMBER_ATTR).unwrap_or("1");
    let container = Selector::attr_eq("data-step-type", step_type);
    steps.iter().find(|step| {
        let mut candidates = document.query_all(step.node, &container);
        if container.matches(document, step.node) {
            candidates.push(step.node);
        }
        candidates
            .into_iter()
            .any(|c| document.attr(c, "data-step-number").unwrap_or("1") == number)
    })
}

fn has_content(document: &Document, card: NodeId) -> bool {
    document
        .query_all(card, &Selector::attr(SUMMARY_FIELD_ATTR))
        .into_iter()
        .any(|node| {
            !document.has_attr(node, EMPTY_MARKER_ATTR)
                && !document.text_content(node).trim().is_empty()
        })
}
