//! Fetch feedback
//!
//! Starts a page fetch whenever the state turns loading and hands the
//! outcome back as a `PageResult` event.

use crate::error::Result;
use crate::pagination::{Page, PageFetcher, PaginationEvent, PaginationState};
use std::fmt::Debug;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

/// Outcome of a fetch, tagged with the activation that started it
#[derive(Debug)]
pub struct FetchOutcome<C, T> {
    /// Activation the fetch belongs to
    pub generation: u64,
    /// What the fetcher returned
    pub result: Result<Page<C, T>>,
}

/// Drives the page fetcher from state changes
///
/// Only one fetch is live at a time. Starting a new one aborts the previous
/// task and bumps the generation, so a result that was already queued by the
/// old task is rejected by [`FetchFeedback::accept`].
pub struct FetchFeedback<C, T, F> {
    fetcher: Arc<F>,
    results: UnboundedSender<FetchOutcome<C, T>>,
    runtime: Option<Handle>,
    generation: u64,
    active: bool,
    in_flight: Option<JoinHandle<()>>,
    _elements: PhantomData<fn() -> T>,
}

impl<C, T, F> FetchFeedback<C, T, F>
where
    C: Clone + Debug + Send + 'static,
    T: Send + 'static,
    F: PageFetcher<C, T>,
{
    /// Create a feedback that reports outcomes on `results`
    pub fn new(fetcher: Arc<F>, results: UnboundedSender<FetchOutcome<C, T>>) -> Self {
        Self {
            fetcher,
            results,
            runtime: None,
            generation: 0,
            active: false,
            in_flight: None,
            _elements: PhantomData,
        }
    }

    /// Spawn fetches on a specific runtime
    #[must_use]
    pub fn with_runtime(mut self, runtime: Option<Handle>) -> Self {
        self.runtime = runtime;
        self
    }

    /// Current activation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Check if a fetch task is outstanding
    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// React to a new state
    ///
    /// A fetch starts only when `fetch_cursor()` goes from `None` to `Some`;
    /// further loading states leave the running fetch alone. Returns whether
    /// a fetch was started.
    pub fn observe(&mut self, state: &PaginationState<C, T>) -> bool {
        match state.fetch_cursor() {
            Some(cursor) if !self.active => {
                self.active = true;
                self.start(cursor.clone());
                true
            }
            Some(_) => false,
            None => {
                self.active = false;
                false
            }
        }
    }

    /// Start a fetch for `cursor`, superseding any fetch in flight
    pub fn start(&mut self, cursor: C) {
        self.cancel();
        let generation = self.generation;
        debug!(generation, cursor = ?cursor, "starting page fetch");

        let fetcher = Arc::clone(&self.fetcher);
        let results = self.results.clone();
        let task = async move {
            let result = fetcher.fetch_page(cursor).await;
            // Receiver is gone once the session ends
            let _ = results.send(FetchOutcome { generation, result });
        };

        self.in_flight = Some(match &self.runtime {
            Some(handle) => handle.spawn(task),
            None => tokio::spawn(task),
        });
    }

    /// Turn an outcome into an event if it belongs to the live activation
    pub fn accept(&mut self, outcome: FetchOutcome<C, T>) -> Option<PaginationEvent<C, T>> {
        if outcome.generation != self.generation {
            trace!(
                generation = outcome.generation,
                current = self.generation,
                "discarding stale page result"
            );
            return None;
        }
        self.in_flight = None;

        match &outcome.result {
            Ok(page) => debug!(
                generation = outcome.generation,
                elements = page.len(),
                last = page.is_last(),
                "page fetched"
            ),
            Err(e) => warn!(generation = outcome.generation, error = %e, "page fetch failed"),
        }
        Some(PaginationEvent::PageResult(outcome.result))
    }

    /// Abort the fetch in flight, if any
    pub fn cancel(&mut self) {
        if let Some(task) = self.in_flight.take() {
            trace!(generation = self.generation, "cancelling page fetch");
            task.abort();
        }
        self.generation += 1;
    }
}

impl<C, T, F> Drop for FetchFeedback<C, T, F> {
    fn drop(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }
}
