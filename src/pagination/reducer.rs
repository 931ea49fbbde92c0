//! State transitions
//!
//! The only place a `PaginationState` changes.

use super::types::{PaginationEvent, PaginationState};

/// Fold one event into the state
///
/// Assumes at most one fetch is in flight; suppressing triggers while
/// loading is left to the trigger feedback.
pub fn reduce<C, T>(
    mut state: PaginationState<C, T>,
    event: PaginationEvent<C, T>,
) -> PaginationState<C, T> {
    match event {
        PaginationEvent::LoadNextRequested => {
            state.is_loading = true;
        }
        PaginationEvent::PageResult(Ok(page)) => {
            state.is_loading = false;
            state.elements.extend(page.elements);
            state.next_cursor = page.next_cursor;
            state.error = None;
        }
        PaginationEvent::PageResult(Err(error)) => {
            // Cursor and elements stay put so the next trigger retries from here
            state.is_loading = false;
            state.error = Some(error);
        }
    }
    state
}

impl<C, T> PaginationState<C, T> {
    /// Apply an event, returning the next state
    #[must_use]
    pub fn apply(self, event: PaginationEvent<C, T>) -> Self {
        reduce(self, event)
    }
}
