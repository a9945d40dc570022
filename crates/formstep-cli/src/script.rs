//! Scripted sessions.
//!
//! A script is a JSON list of user actions, either bare or wrapped in an
//! object under `actions`:
//!
//! ```json
//! [
//!   { "action": "input", "name": "email", "text": "ada@example.com" },
//!   { "action": "check", "name": "plan", "value": "pro" },
//!   { "action": "click", "button": "next" },
//!   { "action": "wait", "ms": 300 },
//!   { "action": "submit" }
//! ]
//! ```

use std::{fmt, fs, path::Path};

use anyhow::{anyhow, Context, Result};
use formstep_core::{
    dom::{NodeId, Selector},
    models::ButtonRole,
    params::{FieldInput, FieldRef, GoTo, Skip},
    session::progress::button_selector,
    FormSession, NavOutcome,
};
use serde::Deserialize;

/// One scripted user action.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Type into a field
    Input(FieldInput),
    /// Commit the current value of a field
    Change(FieldRef),
    /// Check or uncheck a radio or checkbox
    Check(CheckField),
    /// Pick an option of a select by value or label
    Select(SelectOption),
    /// Click a navigation button or a declared trigger
    Click(ClickTarget),
    Next,
    Prev,
    Goto(GoTo),
    Skip(Skip),
    /// Let the clock run, firing deferred work
    Wait { ms: u64 },
    Submit,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckField {
    #[serde(flatten)]
    pub field: FieldRef,
    #[serde(default = "checked_by_default")]
    pub checked: bool,
}

fn checked_by_default() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectOption {
    #[serde(flatten)]
    pub field: FieldRef,
    pub option: String,
}

/// Element to click: a navigation button by role, an element by its
/// `data-go-to` target (narrowed by `data-answer` through `value`), or a
/// control by name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClickTarget {
    #[serde(default)]
    pub button: Option<ButtonRole>,
    #[serde(default)]
    pub go_to: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScriptFile {
    Bare(Vec<Action>),
    Wrapped { actions: Vec<Action> },
}

/// Ordered actions of a scripted session.
#[derive(Debug, Clone, Default)]
pub struct Script {
    pub actions: Vec<Action>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self> {
        let actions = match serde_json::from_str(json).context("Invalid session script")? {
            ScriptFile::Bare(actions) => actions,
            ScriptFile::Wrapped { actions } => actions,
        };
        Ok(Self { actions })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::from_json(&json)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Input(input) => write!(f, "input `{}`", input.field.name),
            Action::Change(field) => write!(f, "change `{}`", field.name),
            Action::Check(check) => {
                let verb = if check.checked { "check" } else { "uncheck" };
                write!(f, "{verb} `{}`", describe(&check.field))
            }
            Action::Select(select) => {
                write!(f, "select `{}` in `{}`", select.option, select.field.name)
            }
            Action::Click(target) => match (&target.button, &target.go_to, &target.name) {
                (Some(role), _, _) => write!(f, "click {} button", role.as_str()),
                (None, Some(go_to), _) => write!(f, "click go-to `{go_to}`"),
                (None, None, Some(name)) => write!(f, "click `{name}`"),
                (None, None, None) => write!(f, "click"),
            },
            Action::Next => write!(f, "next"),
            Action::Prev => write!(f, "prev"),
            Action::Goto(params) => write!(f, "go to `{}`", params.target),
            Action::Skip(Skip { to: Some(to) }) => write!(f, "skip to step {to}"),
            Action::Skip(Skip { to: None }) => write!(f, "skip"),
            Action::Wait { ms } => write!(f, "wait {ms} ms"),
            Action::Submit => write!(f, "submit"),
        }
    }
}

fn describe(field: &FieldRef) -> String {
    match &field.value {
        Some(value) => format!("{}={value}", field.name),
        None => field.name.clone(),
    }
}

fn control(session: &FormSession, field: &FieldRef) -> Result<NodeId> {
    session
        .find_control(field)
        .ok_or_else(|| anyhow!("No control matches `{}`", describe(field)))
}

fn click_target(session: &FormSession, target: &ClickTarget) -> Result<NodeId> {
    let doc = session.document();
    let found = if let Some(role) = target.button {
        doc.query_first(session.form(), &button_selector(role))
    } else if let Some(go_to) = &target.go_to {
        let mut selector = Selector::attr_eq("data-go-to", go_to.as_str());
        if let Some(answer) = &target.value {
            selector = selector.and(Selector::attr_eq("data-answer", answer.as_str()));
        }
        doc.query_first(session.form(), &selector)
    } else if let Some(name) = &target.name {
        session.find_control(&FieldRef {
            name: name.clone(),
            value: target.value.clone(),
        })
    } else {
        return Err(anyhow!("Click needs a button, go_to or name"));
    };
    found.ok_or_else(|| anyhow!("Nothing to click for this target"))
}

/// Applies one action and returns the navigation outcomes it produced.
/// Typing produces none; waiting may produce several.
pub fn apply(session: &mut FormSession, action: &Action) -> Result<Vec<NavOutcome>> {
    let outcomes = match action {
        Action::Input(input) => {
            let node = control(session, &input.field)?;
            session.input(node, &input.text);
            Vec::new()
        }
        Action::Change(field) => {
            let node = control(session, field)?;
            vec![session.change(node)]
        }
        Action::Check(check) => {
            let node = control(session, &check.field)?;
            vec![session.check(node, check.checked)]
        }
        Action::Select(select) => {
            let node = control(session, &select.field)?;
            vec![session.select(node, &select.option)]
        }
        Action::Click(target) => {
            let node = click_target(session, target)?;
            vec![session.click(node)]
        }
        Action::Next => vec![session.go_next()],
        Action::Prev => vec![session.go_prev()],
        Action::Goto(params) => {
            let source = match &params.field {
                Some(name) => Some(control(
                    session,
                    &FieldRef {
                        name: name.clone(),
                        value: None,
                    },
                )?),
                None => None,
            };
            vec![session.go_to(&params.target, params.answer.as_deref(), source)]
        }
        Action::Skip(params) => vec![session.skip(params.to)],
        Action::Wait { ms } => session.advance_time(*ms),
        Action::Submit => vec![session.submit()],
    };
    Ok(outcomes)
}
