//! Random number sources handed to the live phase.
//!
//! Routines never touch an RNG directly. A draw is an effect: it is executed
//! at most once, live, and its result is logged so replays reuse it.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EffectError {
    #[error("cannot draw from empty range {low}..={high}")]
    EmptyRange { low: i64, high: i64 },

    #[error("random source exhausted")]
    Exhausted,
}

pub trait RandomSource: Send + Sync {
    /// Draw an integer in `low..=high`.
    fn draw(&self, low: i64, high: i64) -> Result<i64, EffectError>;
}

fn check_range(low: i64, high: i64) -> Result<(), EffectError> {
    if low > high {
        return Err(EffectError::EmptyRange { low, high });
    }
    Ok(())
}

/// Draws from the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn draw(&self, low: i64, high: i64) -> Result<i64, EffectError> {
        check_range(low, high)?;
        Ok(rand::rng().random_range(low..=high))
    }
}

/// Reproducible draws from a fixed seed, shared by all requests.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn draw(&self, low: i64, high: i64) -> Result<i64, EffectError> {
        check_range(low, high)?;
        Ok(self.rng.lock().random_range(low..=high))
    }
}

/// Returns pre-chosen values in order and counts how often it was asked.
#[derive(Debug, Default)]
pub struct ScriptedRandom {
    values: Mutex<VecDeque<i64>>,
    draws: AtomicUsize,
}

impl ScriptedRandom {
    pub fn new(values: impl IntoIterator<Item = i64>) -> Self {
        Self {
            values: Mutex::new(values.into_iter().collect()),
            draws: AtomicUsize::new(0),
        }
    }

    /// Number of draws made so far, including failed ones.
    pub fn draws(&self) -> usize {
        self.draws.load(Ordering::SeqCst)
    }
}

impl RandomSource for ScriptedRandom {
    fn draw(&self, low: i64, high: i64) -> Result<i64, EffectError> {
        self.draws.fetch_add(1, Ordering::SeqCst);
        check_range(low, high)?;
        self.values.lock().pop_front().ok_or(EffectError::Exhausted)
    }
}

/// Seeded source when a seed is configured, thread RNG otherwise.
pub fn random_source(seed: Option<u64>) -> Arc<dyn RandomSource> {
    match seed {
        Some(seed) => Arc::new(SeededRandom::new(seed)),
        None => Arc::new(ThreadRandom),
    }
}
