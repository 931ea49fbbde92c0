//! Pagination module
//!
//! Page, state and event values plus the reducer that folds events into
//! state.
//!
//! # Overview
//!
//! A session starts from `PaginationState::new(cursor)` in the loading
//! state. Each `PaginationEvent` is folded in with `reduce`:
//! - `LoadNextRequested` marks the state loading
//! - `PageResult(Ok(page))` appends the page and advances the cursor
//! - `PageResult(Err(e))` records the error and leaves data untouched

mod fetcher;
mod reducer;
mod types;

pub use fetcher::PageFetcher;
pub use reducer::reduce;
pub use types::{Page, PaginationEvent, PaginationState};
