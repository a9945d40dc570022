//! Declarative skip conditions (`data-skip-if`).
//!
//! Grammar: `<field>` followed by `=` or `!=` and one or more comma-separated
//! values. No escaping, nesting or boolean composition.
//!
//! - `plan=basic,pro` shows the step only when `plan` is `basic` or `pro`
//!   (the step is skipped otherwise)
//! - `plan!=basic` skips the step when `plan` is `basic`
//!
//! Values are trimmed and compared as exact strings. A missing key never
//! equals any value.

use std::{fmt, str::FromStr};

use log::debug;
use thiserror::Error;

use crate::store::FormDataStore;

/// Failure to parse a condition string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConditionError {
    /// No `=` or `!=` operator with a field before it and values after it
    #[error("Malformed skip condition: {0:?}")]
    Malformed(String),
}

/// Comparison operator of a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionOp {
    /// `=`: show only when the value is listed
    Equals,
    /// `!=`: hide when the value is listed
    NotEquals,
}

impl ConditionOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionOp::Equals => "=",
            ConditionOp::NotEquals => "!=",
        }
    }
}

/// A parsed skip condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipCondition {
    pub field: String,
    pub op: ConditionOp,
    pub values: Vec<String>,
}

impl FromStr for SkipCondition {
    type Err = ConditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The field is the shortest prefix followed by an operator that still
        // leaves at least one character of values.
        for (i, _) in s.char_indices().skip(1) {
            let rest = &s[i..];
            let (op, len) = if rest.starts_with("!=") {
                (ConditionOp::NotEquals, 2)
            } else if rest.starts_with('=') {
                (ConditionOp::Equals, 1)
            } else {
                continue;
            };
            let values = &rest[len..];
            if values.is_empty() {
                continue;
            }
            return Ok(Self {
                field: s[..i].trim().to_string(),
                op,
                values: values.split(',').map(|v| v.trim().to_string()).collect(),
            });
        }
        Err(ConditionError::Malformed(s.to_string()))
    }
}

impl SkipCondition {
    /// True when the step guarded by this condition must be skipped.
    pub fn should_skip(&self, store: &FormDataStore) -> bool {
        let listed = store
            .get(&self.field)
            .is_some_and(|actual| self.values.iter().any(|v| actual.equals_text(v)));
        match self.op {
            ConditionOp::Equals => !listed,
            ConditionOp::NotEquals => listed,
        }
    }
}

impl fmt::Display for SkipCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.field, self.op.as_str(), self.values.join(","))
    }
}

/// Evaluates a raw condition string. Malformed conditions never skip.
pub fn should_skip(condition: &str, store: &FormDataStore) -> bool {
    match condition.parse::<SkipCondition>() {
        Ok(parsed) => parsed.should_skip(store),
        Err(e) => {
            debug!("{e}; treating as never skip");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldValue;

    fn store_with(field: &str, value: &str) -> FormDataStore {
        let mut store = FormDataStore::new();
        store.save(field, FieldValue::text(value));
        store
    }

    #[test]
    fn test_parse_equals_with_multiple_values() {
        let cond: SkipCondition = "country = US, CA".parse().expect("valid");
        assert_eq!(cond.field, "country");
        assert_eq!(cond.op, ConditionOp::Equals);
        assert_eq!(cond.values, vec!["US", "CA"]);
        assert_eq!(cond.to_string(), "country=US,CA");
    }

    #[test]
    fn test_parse_not_equals() {
        let cond: SkipCondition = "plan!=basic".parse().expect("valid");
        assert_eq!(cond.field, "plan");
        assert_eq!(cond.op, ConditionOp::NotEquals);
        assert_eq!(cond.values, vec!["basic"]);
    }

    #[test]
    fn test_parse_uses_first_operator() {
        let cond: SkipCondition = "a=b=c".parse().expect("valid");
        assert_eq!(cond.field, "a");
        assert_eq!(cond.values, vec!["b=c"]);
    }

    #[test]
    fn test_malformed_conditions() {
        for bad in ["garbage", "", "=value", "field=", "field!="] {
            assert!(bad.parse::<SkipCondition>().is_err(), "{bad:?} should not parse");
            assert!(!should_skip(bad, &FormDataStore::new()));
        }
    }

    #[test]
    fn test_equals_semantics() {
        for value in ["US", "CA"] {
            assert!(!should_skip("country=US,CA", &store_with("country", value)));
        }
        assert!(should_skip("country=US,CA", &store_with("country", "MX")));
        assert!(should_skip("country=US,CA", &FormDataStore::new()));
    }

    #[test]
    fn test_not_equals_is_negation() {
        for value in ["US", "CA", "MX"] {
            let store = store_with("country", value);
            assert_eq!(
                should_skip("country!=US,CA", &store),
                !should_skip("country=US,CA", &store)
            );
        }
        assert!(!should_skip("country!=US,CA", &FormDataStore::new()));
    }

    #[test]
    fn test_comparison_is_exact() {
        assert!(should_skip("plan=basic", &store_with("plan", "Basic")));
        assert!(should_skip("plan=basic", &store_with("plan", " basic")));

        let mut store = FormDataStore::new();
        store.save("terms", FieldValue::Bool(true));
        assert!(should_skip("terms=true", &store));
    }
}
