//! Resume a routine from a token by replaying its history.
//!
//! Every call rebuilds the routine from scratch:
//!
//! 1. **Replay**: feed the logged values back in order. No effect runs and
//!    nothing is written to the transcript.
//! 2. **Resume**: if the history was waiting on a prompt, parse the payload
//!    with its resumer and feed that value in.
//! 3. **Live**: run effects for real (transcript text, fresh draws), logging
//!    each result, until the routine stops at a prompt or finishes.
//!
//! The extended history is appended to the store under a new token. A failed
//! call appends nothing.

use std::sync::Arc;

use serde::Serialize;

use super::error::ReplayError;
use super::history::{History, LoggedValue, Payload, PendingResumer};
use super::random::RandomSource;
use super::store::{HistoryStore, Token};
use crate::routine::{Action, ActionKind, Effect, Execution, Prompt, Routine, Value};

pub const DEFAULT_MAX_LIVE_STEPS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Upper bound on effects run in one live phase.
    pub max_live_steps: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_live_steps: DEFAULT_MAX_LIVE_STEPS,
        }
    }
}

/// Where a round trip left the routine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Status {
    /// Waiting on `prompt`; answer it against the returned token.
    Suspended { prompt: Prompt },
    /// The routine finished.
    Done,
}

/// Result of one round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// Token of the history written by this round trip.
    pub token: Token,
    /// Text displayed during the live phase, in order.
    pub transcript: Vec<String>,
    /// Number of logged values replayed before going live.
    pub replayed: usize,
    #[serde(flatten)]
    pub status: Status,
}

impl Outcome {
    pub fn is_done(&self) -> bool {
        matches!(self.status, Status::Done)
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        match &self.status {
            Status::Suspended { prompt } => Some(prompt),
            Status::Done => None,
        }
    }
}

pub struct ReplayEngine {
    routine: Arc<dyn Routine>,
    random: Arc<dyn RandomSource>,
    store: HistoryStore,
    config: EngineConfig,
}

impl ReplayEngine {
    pub fn new(routine: Arc<dyn Routine>, random: Arc<dyn RandomSource>) -> Self {
        Self {
            routine,
            random,
            store: HistoryStore::new(),
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    pub fn routine_name(&self) -> &str {
        self.routine.name()
    }

    /// Begin a new session from the root history.
    pub fn serve_start(&self) -> Result<Outcome, ReplayError> {
        self.serve_continue(Token::ROOT, &Payload::new())
    }

    /// Resume the session stored at `token`, answering its pending prompt
    /// (if any) with `payload`.
    pub fn serve_continue(&self, token: Token, payload: &Payload) -> Result<Outcome, ReplayError> {
        let mut history = self.store.get(token)?;
        let mut exec = Execution::start(self.routine.as_ref());

        let replayed = history.logged.len();
        let mut next = replay(&mut exec, &history.logged)?;
        tracing::debug!(
            routine = self.routine.name(),
            %token,
            replayed,
            "Replayed history"
        );

        if let Some(resumer) = history.pending.take() {
            let prompt = match &next {
                Some(Action::Prompt(prompt)) => prompt,
                Some(other) => {
                    return Err(ReplayError::Divergence {
                        step: replayed,
                        reason: format!(
                            "history waits on a prompt but routine requested {}",
                            other.kind()
                        ),
                    })
                }
                None => {
                    return Err(ReplayError::Divergence {
                        step: replayed,
                        reason: "history waits on a prompt but routine finished".to_string(),
                    })
                }
            };
            if prompt != resumer.prompt() {
                return Err(ReplayError::Divergence {
                    step: replayed,
                    reason: format!(
                        "history waits on `{}` but routine prompted `{}`",
                        resumer.prompt().field,
                        prompt.field
                    ),
                });
            }

            let value =
                resumer
                    .resume(payload)
                    .map_err(|source| ReplayError::MalformedPayload {
                        token,
                        prompt: resumer.prompt().clone(),
                        source,
                    })?;
            history
                .logged
                .push(LoggedValue::new(ActionKind::Prompt, value.clone()));
            exec.supply(value)?;
            next = exec.next_action()?;
        } else if !payload.is_empty() {
            tracing::debug!(%token, "No pending prompt; ignoring payload");
        }

        let mut transcript = Vec::new();
        let mut live_steps = 0usize;
        let status = loop {
            let Some(action) = next else {
                break Status::Done;
            };
            let effect = match action {
                Action::Prompt(prompt) => {
                    history.pending = Some(PendingResumer::new(prompt.clone()));
                    break Status::Suspended { prompt };
                }
                Action::Effect(effect) => effect,
            };

            if live_steps >= self.config.max_live_steps {
                return Err(ReplayError::StepLimit(live_steps));
            }
            let kind = effect.kind();
            let value = self.perform(&effect, &mut transcript)?;
            history.logged.push(LoggedValue::new(kind, value.clone()));
            exec.supply(value)?;
            live_steps += 1;
            next = exec.next_action()?;
        };

        let new_token = self.store.append(history);
        tracing::info!(
            routine = self.routine.name(),
            from = %token,
            to = %new_token,
            live_steps,
            done = matches!(status, Status::Done),
            "Served round trip"
        );

        Ok(Outcome {
            token: new_token,
            transcript,
            replayed,
            status,
        })
    }

    /// Copy of the history stored at `token`.
    pub fn history(&self, token: Token) -> Result<History, ReplayError> {
        self.store.get(token)
    }

    fn perform(&self, effect: &Effect, transcript: &mut Vec<String>) -> Result<Value, ReplayError> {
        match effect {
            Effect::Display { text } => {
                transcript.push(text.clone());
                Ok(Value::Unit)
            }
            Effect::RandomInt { low, high } => Ok(Value::Int(self.random.draw(*low, *high)?)),
        }
    }
}

/// Walk `exec` through `logged` without running any effect. Returns the
/// action the routine is parked on afterwards, or `None` if it finished.
fn replay(exec: &mut Execution, logged: &[LoggedValue]) -> Result<Option<Action>, ReplayError> {
    let mut next = exec.next_action()?;
    for (step, entry) in logged.iter().enumerate() {
        let Some(action) = next else {
            return Err(ReplayError::Divergence {
                step,
                reason: format!("logged {} but routine finished", entry.kind),
            });
        };
        if action.kind() != entry.kind {
            return Err(ReplayError::Divergence {
                step,
                reason: format!(
                    "logged {} but routine requested {}",
                    entry.kind,
                    action.kind()
                ),
            });
        }
        exec.supply(entry.value.clone())?;
        next = exec.next_action()?;
    }
    Ok(next)
}
