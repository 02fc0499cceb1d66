use thiserror::Error;

use super::history::PayloadError;
use super::random::EffectError;
use super::store::Token;
use crate::routine::{Prompt, RoutineError};

#[derive(Debug, Error)]
pub enum ReplayError {
    /// The client referenced a history that was never written (or is not a token at all).
    #[error("unknown history token `{0}`")]
    UnknownToken(String),

    /// The payload did not satisfy the prompt the history is suspended on.
    /// Nothing was recorded; the same token can be retried.
    #[error("invalid input for `{}`: {source}", .prompt.field)]
    MalformedPayload {
        token: Token,
        prompt: Prompt,
        #[source]
        source: PayloadError,
    },

    /// The routine asked for something other than what the log recorded at
    /// this position.
    #[error("replay diverged at step {step}: {reason}")]
    Divergence { step: usize, reason: String },

    /// The live phase ran this many actions without reaching a prompt.
    #[error("routine ran {0} live actions without reaching a prompt")]
    StepLimit(usize),

    #[error("routine failed: {0}")]
    Routine(#[from] RoutineError),

    #[error("effect failed: {0}")]
    Effect(#[from] EffectError),
}

impl ReplayError {
    /// True when the request itself was at fault rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ReplayError::UnknownToken(_) | ReplayError::MalformedPayload { .. }
        )
    }
}
