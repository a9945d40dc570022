//! Session configuration.
//!
//! Every knob has a default matching the observed behavior of the
//! tryformly-compatible scripts, so an empty JSON object is a valid
//! configuration.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{FormError, IoResultExt, Result};

/// Fixed key of the submit-time JSON mirror.
pub const DEFAULT_MIRROR_KEY: &str = "multiStepFormData";

/// How checkboxes are rendered into the data store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum CheckboxPolicy {
    /// `true` / `false`
    Boolean,
    /// Declared value (or `on_value`) when checked, empty string otherwise
    Sentinel {
        #[serde(default = "default_on_value")]
        on_value: String,
    },
}

fn default_on_value() -> String {
    "Yes".to_string()
}

impl Default for CheckboxPolicy {
    fn default() -> Self {
        CheckboxPolicy::Sentinel {
            on_value: default_on_value(),
        }
    }
}

/// Which reading of a select is used for captured values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectReading {
    /// Visible text of the selected option
    #[default]
    Label,
    /// Raw `value` attribute of the selected option
    Value,
}

/// What a summary node shows for an empty value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "text")]
pub enum EmptySummary {
    /// Clear the node
    #[default]
    Blank,
    /// Substitute a fixed placeholder
    Placeholder(String),
}

/// Tunables of a [`crate::session::FormSession`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Validate required fields before advancing
    pub validate_on_next: bool,
    /// Debounce window for text input before the value is stored
    pub debounce_ms: u64,
    /// Visual transition delay; focus moves once it elapses
    pub transition_ms: u64,
    /// Lifetime of a rendered validation error summary
    pub error_dismiss_ms: u64,
    /// Repeated clicks on the same element inside this window are ignored
    pub click_debounce_ms: u64,
    /// Delay before an answer-gated change triggers its jump
    pub conditional_delay_ms: u64,
    /// Checkbox rendering policy
    pub checkbox: CheckboxPolicy,
    /// Select reading used for captured values
    pub select_reading: SelectReading,
    /// Empty-value policy of the summary projector
    pub summary_empty: EmptySummary,
    /// Mirror the submission JSON under `mirror_key`
    pub mirror_storage: bool,
    /// Key of the submission mirror
    pub mirror_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            validate_on_next: true,
            debounce_ms: 300,
            transition_ms: 300,
            error_dismiss_ms: 5000,
            click_debounce_ms: 500,
            conditional_delay_ms: 100,
            checkbox: CheckboxPolicy::default(),
            select_reading: SelectReading::default(),
            summary_empty: EmptySummary::default(),
            mirror_storage: false,
            mirror_key: DEFAULT_MIRROR_KEY.to_string(),
        }
    }
}

impl SessionConfig {
    /// Parses a configuration from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON configuration file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).fs_context(path)?;
        Self::from_json(&json)
    }

    fn validate(&self) -> Result<()> {
        if self.mirror_storage && self.mirror_key.trim().is_empty() {
            return Err(FormError::Configuration {
                message: "mirror_key must not be empty when mirror_storage is enabled"
                    .to_string(),
            });
        }
        Ok(())
    }
}
