//! Shared state for web handlers.

use std::sync::Arc;

use crate::replay::ReplayEngine;

/// Cloned into every handler; all clones share one engine and one store.
#[derive(Clone)]
pub struct WebAppState {
    engine: Arc<ReplayEngine>,
}

impl WebAppState {
    pub fn new(engine: ReplayEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    pub fn engine(&self) -> &ReplayEngine {
        &self.engine
    }
}
