//! Actions a routine can request, and the values they produce.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Result of a single action, fed back into the routine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// Result of an action with nothing to report (e.g. display).
    Unit,
    Text(String),
    Int(i64),
    Bool(bool),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Unit => "unit",
            Value::Text(_) => "text",
            Value::Int(_) => "int",
            Value::Bool(_) => "bool",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => write!(f, "()"),
            Value::Text(s) => write!(f, "{s:?}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Actions that produce a value without outside input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Show a line of text. Produces [`Value::Unit`].
    Display { text: String },
    /// Draw an integer in `low..=high`. Produces [`Value::Int`].
    RandomInt { low: i64, high: i64 },
}

/// Shape of the value a prompt expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Text,
    Integer,
    YesNo,
}

/// An action that cannot complete until someone outside the routine answers it.
///
/// `field` names the payload key a front end reads the answer from; `label` is
/// what gets shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub label: String,
    pub field: String,
    pub kind: InputKind,
}

impl Prompt {
    pub fn new(label: impl Into<String>, field: impl Into<String>, kind: InputKind) -> Self {
        Self {
            label: label.into(),
            field: field.into(),
            kind,
        }
    }
}

/// One step requested by a routine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Effect(Effect),
    Prompt(Prompt),
}

/// Coarse classification of an action, stored next to every logged value so
/// replay can detect a routine that stopped asking for the same things.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Display,
    Random,
    Prompt,
}

impl Effect {
    pub fn kind(&self) -> ActionKind {
        match self {
            Effect::Display { .. } => ActionKind::Display,
            Effect::RandomInt { .. } => ActionKind::Random,
        }
    }
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Effect(effect) => effect.kind(),
            Action::Prompt(_) => ActionKind::Prompt,
        }
    }

    pub fn is_prompt(&self) -> bool {
        matches!(self, Action::Prompt(_))
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::Display => "display",
            ActionKind::Random => "random",
            ActionKind::Prompt => "prompt",
        };
        f.write_str(name)
    }
}
