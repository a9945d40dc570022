//! Status enumerations for steps, transitions and buttons.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Three-valued completion state of a step, driving summary visibility.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CompletionState {
    /// No field inside the step has fired an event yet
    #[default]
    Untouched,

    /// A field inside the step fired a change or input event
    Touched,

    /// The user advanced past the step
    Completed,
}

impl FromStr for CompletionState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "untouched" => Ok(CompletionState::Untouched),
            "touched" => Ok(CompletionState::Touched),
            "completed" => Ok(CompletionState::Completed),
            _ => Err(format!("Invalid completion state: {s}")),
        }
    }
}

impl CompletionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionState::Untouched => "untouched",
            CompletionState::Touched => "touched",
            CompletionState::Completed => "completed",
        }
    }

    /// State with a leading icon for terminal output.
    ///
    /// ```rust
    /// use formstep_core::models::CompletionState;
    ///
    /// assert_eq!(CompletionState::Completed.with_icon(), "✓ Completed");
    /// assert_eq!(CompletionState::Touched.with_icon(), "➤ Touched");
    /// assert_eq!(CompletionState::Untouched.with_icon(), "○ Untouched");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            CompletionState::Completed => "✓ Completed",
            CompletionState::Touched => "➤ Touched",
            CompletionState::Untouched => "○ Untouched",
        }
    }
}

/// Direction of a step transition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Direction of a move from `from` to `to`.
    pub fn between(from: usize, to: usize) -> Self {
        if to > from {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
        }
    }
}

/// Role of a navigation button, detected from its attributes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ButtonRole {
    Next,
    Prev,
    Submit,
}

impl FromStr for ButtonRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "next" | "next-btn" => Ok(ButtonRole::Next),
            "prev" | "back" | "back-btn" => Ok(ButtonRole::Prev),
            "submit" | "submit-btn" => Ok(ButtonRole::Submit),
            _ => Err(format!("Invalid button role: {s}")),
        }
    }
}

impl ButtonRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonRole::Next => "next",
            ButtonRole::Prev => "prev",
            ButtonRole::Submit => "submit",
        }
    }
}
