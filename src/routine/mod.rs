//! Suspending routines and the machinery to drive them one action at a time.

pub mod action;
pub mod context;
pub mod driver;
pub mod error;
pub mod game;

pub use action::{Action, ActionKind, Effect, InputKind, Prompt, Value};
pub use context::{ActionRequest, RoutineContext};
pub use driver::{Execution, Routine};
pub use error::RoutineError;
pub use game::GuessingGame;
