//! In-memory page source
//!
//! An offset-paginated `PageFetcher` over a fixed list of items. Used by the
//! demo CLI and handy for tests.

use crate::error::{Error, Result};
use crate::pagination::{Page, PageFetcher};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

/// How a source answers a page that runs past its end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundsPolicy {
    /// Return the remaining items as the last page
    #[default]
    Truncate,
    /// Fail the fetch with `Error::OutOfBounds` when the page would run past
    /// the end. A page that ends exactly at the end is still a valid last page,
    /// so only `offset + page_size > len` fails.
    Strict,
}

/// Offset-paginated source backed by a vector
///
/// The cursor is the offset of the first item on the page; a page of
/// `page_size` items continues at `offset + page_size`. Clones share the
/// item list and the fetch counter.
#[derive(Debug, Clone)]
pub struct MemorySource<T> {
    items: Arc<[T]>,
    page_size: usize,
    latency: Duration,
    bounds: BoundsPolicy,
    fail_at: Option<usize>,
    fetches: Arc<AtomicUsize>,
}

impl<T> MemorySource<T> {
    /// Create a source serving `items` in pages of `page_size`
    pub fn new(items: impl Into<Arc<[T]>>, page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be at least 1"));
        }
        Ok(Self {
            items: items.into(),
            page_size,
            latency: Duration::ZERO,
            bounds: BoundsPolicy::default(),
            fail_at: None,
            fetches: Arc::default(),
        })
    }

    /// Delay every fetch by `latency`
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Set how pages past the end are answered
    #[must_use]
    pub fn with_bounds(mut self, bounds: BoundsPolicy) -> Self {
        self.bounds = bounds;
        self
    }

    /// Fail every fetch that starts at `offset`
    #[must_use]
    pub fn with_failure_at(mut self, offset: usize) -> Self {
        self.fail_at = Some(offset);
        self
    }

    /// Number of items in the source
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the source has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of fetches started so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl<T: Clone> MemorySource<T> {
    /// Page starting at `offset`, without latency or bookkeeping
    pub fn page_at(&self, offset: usize) -> Result<Page<usize, T>> {
        if self.fail_at == Some(offset) {
            return Err(Error::fetch(format!("injected failure at offset {offset}")));
        }

        let available = self.items.len();
        let Some(end) = offset.checked_add(self.page_size) else {
            return Err(Error::out_of_bounds(usize::MAX, available));
        };
        if offset > available || (self.bounds == BoundsPolicy::Strict && end > available) {
            return Err(Error::out_of_bounds(end, available));
        }

        let end = end.min(available);
        let next = (end < available).then_some(end);
        Ok(Page::new(next, self.items[offset..end].to_vec()))
    }
}

#[async_trait]
impl<T> PageFetcher<usize, T> for MemorySource<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn fetch_page(&self, offset: usize) -> Result<Page<usize, T>> {
        let fetch = self.fetches.fetch_add(1, Ordering::SeqCst) + 1;
        trace!(fetch, offset, "memory source fetch");
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.page_at(offset)
    }
}
