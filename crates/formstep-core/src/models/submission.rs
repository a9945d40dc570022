//! Persisted submission record.

use std::collections::BTreeMap;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::FieldValue;

/// A completed form submission as recorded by the submission store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Submission {
    /// Unique identifier of the record
    pub id: u64,

    /// `data-form-id` of the submitted form
    pub form_id: String,

    /// Every captured entry of the data store at submit time
    pub data: BTreeMap<String, FieldValue>,

    /// Number of steps the form declared
    pub total_steps: usize,

    /// Timestamp of the submission (UTC)
    pub submitted_at: Timestamp,
}

impl Submission {
    /// Number of captured entries with a non-blank value.
    pub fn filled_count(&self) -> usize {
        self.data.values().filter(|v| !v.is_blank()).count()
    }
}
