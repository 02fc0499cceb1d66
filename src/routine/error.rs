use thiserror::Error;

use super::action::ActionKind;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoutineError {
    /// The value handed back for an action was not of the type the routine asked for.
    #[error("{action} expected a {expected} value, got {found}")]
    UnexpectedValue {
        action: ActionKind,
        expected: &'static str,
        found: &'static str,
    },

    /// The routine suspended on something that was not an action request.
    #[error("routine suspended without requesting an action")]
    Stalled,

    /// The routine had more than one action outstanding at once, e.g. by
    /// joining two requests.
    #[error("routine requested a second action before the first was answered")]
    OverlappingRequests,

    /// A value was supplied while no action was outstanding.
    #[error("no action is waiting for a value")]
    NothingPending,

    /// The driver asked for the next action before answering the current one.
    #[error("the current action is still waiting for a value")]
    AwaitingValue,

    /// Failure raised by the routine's own logic.
    #[error("{0}")]
    Failed(String),
}
