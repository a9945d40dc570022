//! Per-form map of last-known field values.
//!
//! A key exists only once the corresponding field has fired an event, so an
//! absent key ("untouched") is distinguishable from an empty string
//! ("cleared"). Navigation triggered by `go_to` also records its target under
//! reserved keys that cannot collide with ordinary field names.

use std::collections::{btree_map, BTreeMap};

use serde::{Deserialize, Serialize};

use crate::models::FieldValue;

/// Reserved key: last `go_to` target.
pub const LAST_GO_TO_KEY: &str = "_lastGoTo";
/// Reserved key: navigation currently in progress.
pub const CURRENT_NAVIGATION_KEY: &str = "_currentNavigation";
/// Reserved key: last symbolic branch target.
pub const BRANCH_TARGET_KEY: &str = "_branchTarget";

/// All reserved navigation keys.
pub const RESERVED_KEYS: [&str; 3] = [LAST_GO_TO_KEY, CURRENT_NAVIGATION_KEY, BRANCH_TARGET_KEY];

/// Field name → last-known value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormDataStore {
    entries: BTreeMap<String, FieldValue>,
}

impl FormDataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `value` for `name`, replacing any previous value.
    pub fn save(&mut self, name: impl Into<String>, value: FieldValue) {
        self.entries.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, reserved keys included, in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, FieldValue> {
        self.entries.iter()
    }

    /// Entries written by fields, excluding reserved navigation keys.
    pub fn field_entries(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.entries
            .iter()
            .filter(|(k, _)| !RESERVED_KEYS.contains(&k.as_str()))
    }

    /// Records a `go_to` navigation target under the reserved keys.
    pub fn record_navigation(&mut self, target: &str) {
        self.save(LAST_GO_TO_KEY, FieldValue::text(target));
        self.save(CURRENT_NAVIGATION_KEY, FieldValue::text(target));
    }

    /// Records a symbolic branch target.
    pub fn record_branch_target(&mut self, target: &str) {
        self.save(BRANCH_TARGET_KEY, FieldValue::text(target));
    }

    /// True when any field value equals `answer`.
    pub fn any_field_equals(&self, answer: &str) -> bool {
        self.field_entries().any(|(_, v)| v.equals_text(answer))
    }

    /// True when any reserved navigation key equals `answer`.
    pub fn navigation_equals(&self, answer: &str) -> bool {
        RESERVED_KEYS
            .iter()
            .filter_map(|k| self.get(k))
            .any(|v| v.equals_text(answer))
    }

    /// Copy of all entries.
    pub fn snapshot(&self) -> BTreeMap<String, FieldValue> {
        self.entries.clone()
    }
}

impl<'a> IntoIterator for &'a FormDataStore {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = btree_map::Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
