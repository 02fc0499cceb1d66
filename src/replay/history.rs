//! Recorded results of past runs and the parser waiting for the next input.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::routine::{ActionKind, InputKind, Prompt, Value};

/// Raw key/value input for one round trip, e.g. decoded form fields.
pub type Payload = BTreeMap<String, String>;

/// Why a payload could not be turned into a prompt's value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PayloadError {
    #[error("missing field `{field}`")]
    MissingField { field: String },

    #[error("`{raw}` is not a whole number")]
    NotAnInteger { field: String, raw: String },

    #[error("`{raw}` is not yes or no")]
    NotYesNo { field: String, raw: String },
}

/// One value fed back to the routine, tagged with the kind of action that
/// asked for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedValue {
    pub kind: ActionKind,
    pub value: Value,
}

impl LoggedValue {
    pub fn new(kind: ActionKind, value: Value) -> Self {
        Self { kind, value }
    }
}

/// Parse rule for the prompt a routine is suspended on.
///
/// Holds nothing but the prompt itself; the routine's own state is rebuilt by
/// replay on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingResumer {
    prompt: Prompt,
}

impl PendingResumer {
    pub fn new(prompt: Prompt) -> Self {
        Self { prompt }
    }

    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    /// Turn a raw payload into the value the prompt is waiting for.
    pub fn resume(&self, payload: &Payload) -> Result<Value, PayloadError> {
        parse_input(&self.prompt, payload)
    }
}

/// Parse the prompt's field out of `payload` according to its input kind.
pub fn parse_input(prompt: &Prompt, payload: &Payload) -> Result<Value, PayloadError> {
    let raw = payload
        .get(&prompt.field)
        .ok_or_else(|| PayloadError::MissingField {
            field: prompt.field.clone(),
        })?;

    match prompt.kind {
        InputKind::Text => Ok(Value::Text(raw.clone())),
        InputKind::Integer => {
            raw.trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| PayloadError::NotAnInteger {
                    field: prompt.field.clone(),
                    raw: raw.clone(),
                })
        }
        InputKind::YesNo => match raw.trim().chars().next() {
            Some('y' | 'Y') => Ok(Value::Bool(true)),
            Some('n' | 'N') => Ok(Value::Bool(false)),
            _ => Err(PayloadError::NotYesNo {
                field: prompt.field.clone(),
                raw: raw.clone(),
            }),
        },
    }
}

/// Everything needed to rebuild a routine at one point of one session.
///
/// `logged` holds every value handed to the routine, in the order it asked
/// for them. `pending` is set exactly when the routine last stopped at a
/// prompt that has not been answered yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    pub pending: Option<PendingResumer>,
    pub logged: Vec<LoggedValue>,
}

impl History {
    /// A routine that has not started yet.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_suspended(&self) -> bool {
        self.pending.is_some()
    }

    pub fn len(&self) -> usize {
        self.logged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logged.is_empty()
    }
}
