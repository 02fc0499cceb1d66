//! Replay-based continuations.
//!
//! A stateless request handler cannot keep a suspended routine alive between
//! requests, so instead it keeps the *values* the routine was given. Handing
//! those values back in order walks a fresh copy of the routine to the same
//! point, after which it can be continued for real.

pub mod engine;
pub mod error;
pub mod history;
pub mod random;
pub mod store;

pub use engine::{EngineConfig, Outcome, ReplayEngine, Status, DEFAULT_MAX_LIVE_STEPS};
pub use error::ReplayError;
pub use history::{History, LoggedValue, Payload, PayloadError, PendingResumer};
pub use random::{random_source, EffectError, RandomSource, ScriptedRandom, SeededRandom, ThreadRandom};
pub use store::{HistoryStore, Token};
