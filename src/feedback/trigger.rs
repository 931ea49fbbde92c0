//! Trigger feedback
//!
//! Turns external load-more signals into `LoadNextRequested` events while
//! the session is idle, and drops them otherwise.

use crate::pagination::{PaginationEvent, PaginationState};
use tracing::trace;

/// Gate between the load-more signal and the reducer
///
/// Closed while a fetch is running and once the source is exhausted. A signal
/// while exhausted would otherwise leave the state loading with nothing to fetch.
/// Signals that hit a closed gate are discarded, never queued, so the first
/// signal seen after the gate reopens is the first one honored.
#[derive(Debug, Clone, Default)]
pub struct TriggerFeedback {
    open: bool,
    honored: u64,
    suppressed: u64,
}

impl TriggerFeedback {
    /// Create a closed gate
    pub fn new() -> Self {
        Self::default()
    }

    /// Reopen or close the gate for a new state
    pub fn observe<C, T>(&mut self, state: &PaginationState<C, T>) {
        self.open = state.can_load_more();
    }

    /// Check if the next signal would be honored
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Map one signal to at most one event
    pub fn filter<C, T>(&mut self) -> Option<PaginationEvent<C, T>> {
        if self.open {
            // Closed until the reducer output is observed again
            self.open = false;
            self.honored += 1;
            Some(PaginationEvent::LoadNextRequested)
        } else {
            self.suppressed += 1;
            trace!(suppressed = self.suppressed, "dropping load-more signal");
            None
        }
    }

    /// Signals turned into events so far
    pub fn honored(&self) -> u64 {
        self.honored
    }

    /// Signals dropped so far
    pub fn suppressed(&self) -> u64 {
        self.suppressed
    }
}
