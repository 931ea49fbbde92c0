// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::needless_pass_by_value)]

//! # pagefeed
//!
//! Incremental, cursor-based pagination driven by a feedback loop.
//!
//! ## Features
//!
//! - **Generic cursors**: any `Clone` cursor type, any element type
//! - **Load-more signals**: triggers are honored only while idle
//! - **Switch-latest cancellation**: stale fetches never reach the state
//! - **Recoverable failures**: fetch errors land in the state, never end it
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use pagefeed::{load_more_channel, paginate, Page};
//!
//! #[tokio::main]
//! async fn main() {
//!     let fetch = |offset: usize| async move {
//!         let items: Vec<usize> = (offset..offset + 10).collect();
//!         Ok::<_, pagefeed::Error>(Page::new(Some(offset + 10), items))
//!     };
//!
//!     let (load_more, signal) = load_more_channel();
//!     let mut states = paginate(0, signal, fetch);
//!
//!     while let Some(state) = states.next().await {
//!         if !state.is_loading && state.elements.len() < 30 {
//!             load_more.trigger();
//!         }
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//!   load-more signal ──► TriggerFeedback ──┐
//!                                          ├─► reduce(state, event) ──► StateStream
//!   PageFetcher ◄─── FetchFeedback ◄───────┘          │
//!        │                 ▲                          │
//!        └── PageResult ───┘◄──── state ──────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Page, state, event and reducer
pub mod pagination;

/// Fetch and trigger feedbacks
pub mod feedback;

/// Session driver and output stream
pub mod engine;

/// In-memory page source
pub mod source;

/// Command-line demo
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use engine::{
    load_more_channel, paginate, paginate_sessions, EngineConfig, LoadMore, PaginationEngine,
    StateStream,
};
pub use error::{Error, Result};
pub use pagination::{reduce, Page, PageFetcher, PaginationEvent, PaginationState};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
