//! Pagination types
//!
//! Defines the page, state and event values the reducer folds over.

use crate::error::{Error, Result};
use serde::{Serialize, Serializer};

/// Result of one page fetch
///
/// `next_cursor` is the cursor for the following page; `None` means the
/// source has no more data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<C, T> {
    /// Cursor for the next fetch
    pub next_cursor: Option<C>,
    /// Elements in server order
    pub elements: Vec<T>,
}

impl<C, T> Page<C, T> {
    /// Create a page that continues at `next_cursor`
    pub fn new(next_cursor: Option<C>, elements: Vec<T>) -> Self {
        Self {
            next_cursor,
            elements,
        }
    }

    /// Create the final page of a source
    pub fn last(elements: Vec<T>) -> Self {
        Self {
            next_cursor: None,
            elements,
        }
    }

    /// Check if this page ends the source
    pub fn is_last(&self) -> bool {
        self.next_cursor.is_none()
    }

    /// Number of elements on this page
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if this page carries no elements
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Snapshot of a pagination session
///
/// Replaced wholesale on every event, never shared mutably.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationState<C, T> {
    /// A fetch is in flight for `next_cursor`
    pub is_loading: bool,
    /// Cursor for the next fetch, `None` once the source is exhausted
    pub next_cursor: Option<C>,
    /// Everything accumulated this session, oldest first
    pub elements: Vec<T>,
    /// Most recent fetch failure
    #[serde(serialize_with = "serialize_error")]
    pub error: Option<Error>,
}

impl<C, T> PaginationState<C, T> {
    /// Seed state for a new session
    ///
    /// Starts in the loading state so the first page is fetched without an
    /// explicit trigger.
    pub fn new(initial_cursor: C) -> Self {
        Self {
            is_loading: true,
            next_cursor: Some(initial_cursor),
            elements: Vec::new(),
            error: None,
        }
    }

    /// Check if a fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Cursor the next fetch will use
    pub fn next_cursor(&self) -> Option<&C> {
        self.next_cursor.as_ref()
    }

    /// Accumulated elements
    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    /// Most recent fetch failure
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Idle with nothing left to fetch
    pub fn is_exhausted(&self) -> bool {
        !self.is_loading && self.next_cursor.is_none()
    }

    /// Idle with a cursor to continue from
    pub fn can_load_more(&self) -> bool {
        !self.is_loading && self.next_cursor.is_some()
    }

    /// Cursor a fetch should be running for, if any
    pub fn fetch_cursor(&self) -> Option<&C> {
        if self.is_loading {
            self.next_cursor.as_ref()
        } else {
            None
        }
    }

    /// Consume the state, keeping only the elements
    pub fn into_elements(self) -> Vec<T> {
        self.elements
    }
}

fn serialize_error<S: Serializer>(
    error: &Option<Error>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match error {
        Some(e) => serializer.serialize_some(&e.to_string()),
        None => serializer.serialize_none(),
    }
}

/// Input that moves a pagination session forward
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaginationEvent<C, T> {
    /// Outcome of a fetch
    PageResult(Result<Page<C, T>>),
    /// An accepted load-more trigger
    LoadNextRequested,
}

impl<C, T> PaginationEvent<C, T> {
    /// Successful fetch
    pub fn page(page: Page<C, T>) -> Self {
        Self::PageResult(Ok(page))
    }

    /// Failed fetch
    pub fn failure(error: Error) -> Self {
        Self::PageResult(Err(error))
    }

    /// Short label for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PageResult(Ok(_)) => "page",
            Self::PageResult(Err(_)) => "failure",
            Self::LoadNextRequested => "load_next",
        }
    }
}
