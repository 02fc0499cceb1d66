//! Append-only store of histories addressed by token.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::error::ReplayError;
use super::history::History;

/// Position of a history in the store, round-tripped through the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(u64);

impl Token {
    /// The empty history every store is seeded with.
    pub const ROOT: Token = Token(0);

    pub fn new(index: u64) -> Self {
        Self(index)
    }

    pub fn index(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Token {
    type Err = ReplayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Token)
            .map_err(|_| ReplayError::UnknownToken(s.to_string()))
    }
}

/// Histories in the order they were written.
///
/// Entries are never changed or removed once appended, so readers only need
/// the lock long enough to clone an `Arc`.
#[derive(Debug)]
pub struct HistoryStore {
    histories: RwLock<Vec<Arc<History>>>,
}

impl HistoryStore {
    /// Create a store holding only the empty history at [`Token::ROOT`].
    pub fn new() -> Self {
        Self {
            histories: RwLock::new(vec![Arc::new(History::empty())]),
        }
    }

    /// Store `history` at the next free position and return its token.
    pub fn append(&self, history: History) -> Token {
        let mut histories = self.histories.write();
        histories.push(Arc::new(history));
        Token((histories.len() - 1) as u64)
    }

    /// Copy of the history at `token`.
    ///
    /// Tokens past the end, including ones that will only be issued later,
    /// are [`ReplayError::UnknownToken`].
    pub fn get(&self, token: Token) -> Result<History, ReplayError> {
        let entry = {
            let histories = self.histories.read();
            usize::try_from(token.0)
                .ok()
                .and_then(|index| histories.get(index))
                .cloned()
        };
        entry
            .map(|history| History::clone(&history))
            .ok_or_else(|| ReplayError::UnknownToken(token.to_string()))
    }

    pub fn len(&self) -> usize {
        self.histories.read().len()
    }

    /// Always false: the store starts with the root history.
    pub fn is_empty(&self) -> bool {
        self.histories.read().is_empty()
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}
