pub mod config;
pub mod replay;
pub mod routine;
pub mod terminal;
pub mod util;
pub mod web;

pub use config::Config;
pub use replay::{History, HistoryStore, Outcome, Payload, ReplayEngine, ReplayError, Status, Token};
pub use routine::{GuessingGame, Routine, RoutineContext, RoutineError};
pub use terminal::{TerminalError, TerminalSession};
