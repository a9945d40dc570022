//! Per-field enhancements: input formatting, character counters and
//! country selects.
//!
//! Enhancements are declared on the fields themselves:
//!
//! - `data-format="phone-us|currency|credit-card"` reformats the value on
//!   every input
//! - `data-character-counter="true"` with `maxlength` (or `data-max-length`)
//!   attaches a counter; `data-counter-format` may use `{remaining}`,
//!   `{current}` and `{max}`; `data-counter-position="before"` places it
//!   before the field
//! - `data-country-code="true"` on a `select` fills it with countries,
//!   shaped by `data-country-format`, `data-country-value` and
//!   `data-country-sort-by`
//!
//! The enhancer shares no state with navigation; it only reads and writes
//! the same document.

use std::str::FromStr;

use log::debug;

use crate::{
    countries::{Country, COUNTRIES},
    dom::{Document, ElementSpec, NodeId, Selector},
};

/// Class of counter elements.
pub const COUNTER_CLASS: &str = "wf-character-counter";
const COUNTER_WARNING_CLASS: &str = "wf-counter-warning";
const COUNTER_DANGER_CLASS: &str = "wf-counter-danger";
/// Links a counter to its field.
const COUNTER_FOR_ATTR: &str = "data-counter-for";

/// Input formatting applied on every input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    PhoneUs,
    Currency,
    CreditCard,
}

impl FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "phone-us" => Ok(InputFormat::PhoneUs),
            "currency" => Ok(InputFormat::Currency),
            "credit-card" => Ok(InputFormat::CreditCard),
            _ => Err(format!("Unknown input format: {s}")),
        }
    }
}

impl InputFormat {
    /// Reformats a raw value.
    pub fn apply(&self, raw: &str) -> String {
        match self {
            InputFormat::PhoneUs => format_phone_us(raw),
            InputFormat::Currency => format_currency(raw),
            InputFormat::CreditCard => format_credit_card(raw),
        }
    }
}

fn digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// `(xxx) xxx-xxxx` once ten digits are present; bare digits before that.
fn format_phone_us(raw: &str) -> String {
    let digits = digits(raw);
    if digits.len() < 10 {
        return digits;
    }
    format!(
        "({}) {}-{}{}",
        &digits[..3],
        &digits[3..6],
        &digits[6..10],
        &digits[10..]
    )
}

/// `$` followed by digits with at most one decimal point and two decimals.
fn format_currency(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let value = match cleaned.split_once('.') {
        Some((whole, fraction)) => {
            let fraction: String = fraction.chars().filter(|c| *c != '.').take(2).collect();
            format!("{whole}.{fraction}")
        }
        None => cleaned,
    };
    if value.is_empty() {
        value
    } else {
        format!("${value}")
    }
}

/// Digits grouped by four.
fn format_credit_card(raw: &str) -> String {
    let digits = digits(raw);
    let mut out = String::with_capacity(digits.len() + digits.len() / 4);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && i % 4 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Severity of a character counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterLevel {
    Normal,
    /// More than 75% of the limit used
    Warning,
    /// More than 90% of the limit used
    Danger,
}

/// Rendered state of a character counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterState {
    pub text: String,
    pub level: CounterLevel,
}

/// Computes the counter for `current` characters out of `max`.
pub fn counter_state(current: usize, max: usize, format: Option<&str>) -> CounterState {
    let remaining = max as i64 - current as i64;
    let text = match format {
        Some(format) => format
            .replace("{remaining}", &remaining.to_string())
            .replace("{current}", &current.to_string())
            .replace("{max}", &max.to_string()),
        None => format!("{remaining} characters remaining"),
    };
    let percent = if max == 0 {
        100.0
    } else {
        current as f64 / max as f64 * 100.0
    };
    let level = if percent > 90.0 {
        CounterLevel::Danger
    } else if percent > 75.0 {
        CounterLevel::Warning
    } else {
        CounterLevel::Normal
    };
    CounterState { text, level }
}

/// Display text of a country option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountryDisplay {
    #[default]
    FlagNameCode,
    FlagName,
    NameCode,
    Name,
    Code,
}

impl FromStr for CountryDisplay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flag-name-code" => Ok(CountryDisplay::FlagNameCode),
            "flag-name" => Ok(CountryDisplay::FlagName),
            "name-code" => Ok(CountryDisplay::NameCode),
            "name" => Ok(CountryDisplay::Name),
            "code" => Ok(CountryDisplay::Code),
            _ => Err(format!("Unknown country format: {s}")),
        }
    }
}

/// Submitted value of a country option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountryValue {
    #[default]
    Code,
    Name,
    Full,
}

impl FromStr for CountryValue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "code" => Ok(CountryValue::Code),
            "name" => Ok(CountryValue::Name),
            "full" => Ok(CountryValue::Full),
            _ => Err(format!("Unknown country value: {s}")),
        }
    }
}

/// Ordering of country options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountrySort {
    #[default]
    Name,
    Code,
}

impl FromStr for CountrySort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(CountrySort::Name),
            "code" => Ok(CountrySort::Code),
            _ => Err(format!("Unknown country sort: {s}")),
        }
    }
}

/// One rendered country option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryOption {
    pub label: String,
    pub value: String,
}

/// Country options shaped by display format, value type and ordering.
pub fn country_options(
    display: CountryDisplay,
    value: CountryValue,
    sort: CountrySort,
) -> Vec<CountryOption> {
    let mut countries: Vec<&Country> = COUNTRIES.iter().collect();
    match sort {
        CountrySort::Name => countries.sort_by_key(|c| c.name),
        CountrySort::Code => countries.sort_by_key(|c| c.dial_code),
    }
    countries
        .into_iter()
        .map(|c| {
            let label = match display {
                CountryDisplay::FlagNameCode => {
                    format!("{} {} ({})", c.flag(), c.name, c.dial_code)
                }
                CountryDisplay::FlagName => format!("{} {}", c.flag(), c.name),
                CountryDisplay::NameCode => format!("{} ({})", c.name, c.dial_code),
                CountryDisplay::Name => c.name.to_string(),
                CountryDisplay::Code => c.dial_code.to_string(),
            };
            let value = match value {
                CountryValue::Code => c.dial_code.to_string(),
                CountryValue::Name => c.name.to_string(),
                CountryValue::Full => format!("{} ({})", c.name, c.dial_code),
            };
            CountryOption { label, value }
        })
        .collect()
}

/// Parses an optional enum attribute, falling back to the default on absent
/// or unknown values.
fn parse_attr<T: FromStr + Default>(document: &Document, node: NodeId, name: &str) -> T {
    document
        .attr(node, name)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_default()
}

/// Attaches declared enhancements and reformats fields on input.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldEnhancer;

impl FieldEnhancer {
    /// Sets up counters and country selects inside `scope`. Returns the
    /// number of enhanced fields.
    pub fn attach(&self, document: &mut Document, scope: NodeId) -> usize {
        let mut enhanced = 0;

        let counters =
            document.query_all(scope, &Selector::attr_eq("data-character-counter", "true"));
        for field in counters {
            if self.attach_counter(document, field).is_some() {
                enhanced += 1;
            }
        }

        let selects = document.query_all(
            scope,
            &Selector::tag("select").and(Selector::attr_eq("data-country-code", "true")),
        );
        for select in selects {
            self.fill_country_select(document, select);
            enhanced += 1;
        }

        debug!("Enhanced {enhanced} fields");
        enhanced
    }

    fn attach_counter(&self, document: &mut Document, field: NodeId) -> Option<NodeId> {
        max_length(document, field)?;
        let key = counter_key(document, field);
        let spec = ElementSpec::new("div")
            .attr("class", COUNTER_CLASS)
            .attr(COUNTER_FOR_ATTR, key);
        let counter = if document.attr(field, "data-counter-position") == Some("before") {
            document.insert_before(field, spec)
        } else {
            let parent = document.parent(field).unwrap_or(document.root());
            document.append_child(parent, spec)
        };
        self.update_counter(document, field);
        Some(counter)
    }

    /// Replaces the options of `select` with the country list. A leading
    /// placeholder (empty value, empty text or `disabled`) is kept.
    fn fill_country_select(&self, document: &mut Document, select: NodeId) {
        let existing = document.options(select);
        let keep = existing
            .first()
            .copied()
            .filter(|first| is_placeholder(document, *first));
        for option in existing {
            if Some(option) != keep {
                document.remove(option);
            }
        }

        let options = country_options(
            parse_attr(document, select, "data-country-format"),
            parse_attr(document, select, "data-country-value"),
            parse_attr(document, select, "data-country-sort-by"),
        );
        for option in options {
            document.append_child(
                select,
                ElementSpec::new("option")
                    .attr("value", option.value)
                    .text(option.label),
            );
        }
    }

    /// Applies the declared input format and refreshes the counter of
    /// `field`. Returns true when the value was rewritten.
    pub fn on_input(&self, document: &mut Document, field: NodeId) -> bool {
        let format = document
            .attr(field, "data-format")
            .and_then(|f| f.parse::<InputFormat>().ok());
        let mut rewritten = false;
        if let Some(format) = format {
            let current = document.value(field);
            let formatted = format.apply(&current);
            if formatted != current {
                document.set_value(field, formatted);
                rewritten = true;
            }
        }
        self.update_counter(document, field);
        rewritten
    }

    /// Recomputes the counter attached to `field`, if any.
    pub fn update_counter(&self, document: &mut Document, field: NodeId) -> Option<CounterState> {
        let max = max_length(document, field)?;
        let key = counter_key(document, field);
        let scope = document.parent(field).unwrap_or(document.root());
        let counter = document.query_first(
            scope,
            &Selector::class(COUNTER_CLASS).and(Selector::attr_eq(COUNTER_FOR_ATTR, key)),
        )?;
        let current = document.value(field).chars().count();
        let state = counter_state(current, max, document.attr(field, "data-counter-format"));

        document.set_text(counter, state.text.clone());
        document.remove_class(counter, COUNTER_WARNING_CLASS);
        document.remove_class(counter, COUNTER_DANGER_CLASS);
        match state.level {
            CounterLevel::Warning => document.add_class(counter, COUNTER_WARNING_CLASS),
            CounterLevel::Danger => document.add_class(counter, COUNTER_DANGER_CLASS),
            CounterLevel::Normal => {}
        }
        Some(state)
    }
}

fn max_length(document: &Document, field: NodeId) -> Option<usize> {
    document
        .attr(field, "maxlength")
        .or_else(|| document.attr(field, "data-max-length"))
        .and_then(|m| m.trim().parse().ok())
}

fn counter_key(document: &Document, field: NodeId) -> String {
    document
        .attr(field, "name")
        .map(String::from)
        .unwrap_or_else(|| field.0.to_string())
}

fn is_placeholder(document: &Document, option: NodeId) -> bool {
    document.attr(option, "value").is_some_and(str::is_empty)
        || document.text_content(option).trim().is_empty()
        || document.has_attr(option, "disabled")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_us_format() {
        assert_eq!(InputFormat::PhoneUs.apply("555-123"), "555123");
        assert_eq!(InputFormat::PhoneUs.apply("5551234567"), "(555) 123-4567");
        assert_eq!(InputFormat::PhoneUs.apply("(555) 123-45678"), "(555) 123-45678");
    }

    #[test]
    fn test_currency_format() {
        assert_eq!(InputFormat::Currency.apply("12.345"), "$12.34");
        assert_eq!(InputFormat::Currency.apply("1.2.3"), "$1.23");
        assert_eq!(InputFormat::Currency.apply("abc"), "");
        assert_eq!(InputFormat::Currency.apply("$1,000"), "$1000");
    }

    #[test]
    fn test_credit_card_format() {
        assert_eq!(
            InputFormat::CreditCard.apply("4111111111111111"),
            "4111 1111 1111 1111"
        );
        assert_eq!(InputFormat::CreditCard.apply("41111"), "4111 1");
    }

    #[test]
    fn test_counter_levels_and_format() {
        let state = counter_state(5, 10, None);
        assert_eq!(state.text, "5 characters remaining");
        assert_eq!(state.level, CounterLevel::Normal);

        assert_eq!(counter_state(8, 10, None).level, CounterLevel::Warning);
        assert_eq!(counter_state(10, 10, None).level, CounterLevel::Danger);

        let custom = counter_state(3, 20, Some("{current}/{max} ({remaining} left)"));
        assert_eq!(custom.text, "3/20 (17 left)");
    }

    #[test]
    fn test_country_options() {
        let options = country_options(
            CountryDisplay::NameCode,
            CountryValue::Code,
            CountrySort::Name,
        );
        assert_eq!(options.len(), COUNTRIES.len());
        assert_eq!(options[0].label, "Argentina (+54)");
        assert_eq!(options[0].value, "+54");

        let by_code = country_options(CountryDisplay::Name, CountryValue::Full, CountrySort::Code);
        assert_eq!(by_code[0].value, "Canada (+1)");
    }

    #[test]
    fn test_attach_and_input() {
        let mut doc = Document::from_spec(
            ElementSpec::new("form")
                .child(
                    ElementSpec::new("div").child(
                        ElementSpec::new("textarea")
                            .attr("name", "bio")
                            .attr("maxlength", "10")
                            .attr("data-character-counter", "true"),
                    ),
                )
                .child(
                    ElementSpec::new("input")
                        .attr("name", "card")
                        .attr("data-format", "credit-card"),
                )
                .child(
                    ElementSpec::new("select")
                        .attr("name", "country")
                        .attr("data-country-code", "true")
                        .attr("data-country-format", "name"),
                ),
        );
        let root = doc.root();
        assert_eq!(FieldEnhancer.attach(&mut doc, root), 2);

        let bio = doc.query_first(root, &Selector::attr_eq("name", "bio")).expect("bio");
        let counter = doc.query_first(root, &Selector::class(COUNTER_CLASS)).expect("counter");
        assert_eq!(doc.text_content(counter), "10 characters remaining");

        doc.set_value(bio, "123456789");
        FieldEnhancer.on_input(&mut doc, bio);
        assert_eq!(doc.text_content(counter), "1 characters remaining");
        assert!(doc.has_class(counter, "wf-counter-warning"));
        assert!(!doc.has_class(counter, "wf-counter-danger"));

        let card = doc.query_first(root, &Selector::attr_eq("name", "card")).expect("card");
        doc.set_value(card, "12345678");
        assert!(FieldEnhancer.on_input(&mut doc, card));
        assert_eq!(doc.value(card), "1234 5678");

        let select = doc.query_first(root, &Selector::tag("select")).expect("select");
        assert_eq!(doc.options(select).len(), COUNTRIES.len());
    }

    #[test]
    fn test_country_select_replaces_seeded_options() {
        let mut doc = Document::from_spec(
            ElementSpec::new("select")
                .attr("name", "country")
                .attr("data-country-code", "true")
                .child(ElementSpec::new("option").attr("value", "").text("Choose a country"))
                .child(ElementSpec::new("option").attr("value", "+1").text("United States")),
        );
        let root = doc.root();
        assert_eq!(FieldEnhancer.attach(&mut doc, root), 1);

        let options = doc.options(root);
        assert_eq!(options.len(), COUNTRIES.len() + 1);
        assert_eq!(doc.text_content(options[0]), "Choose a country");
        let seeded = options
            .iter()
            .filter(|o| doc.text_content(**o) == "United States")
            .count();
        assert_eq!(seeded, 0);
    }

    #[test]
    fn test_country_select_without_placeholder() {
        let mut doc = Document::from_spec(
            ElementSpec::new("select")
                .attr("data-country-code", "true")
                .child(ElementSpec::new("option").attr("value", "x").text("Stale")),
        );
        let root = doc.root();
        FieldEnhancer.attach(&mut doc, root);
        assert_eq!(doc.options(root).len(), COUNTRIES.len());
    }
}
