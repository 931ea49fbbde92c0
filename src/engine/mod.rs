//! Execution engine module
//!
//! Runs the pagination feedback loop.
//!
//! # Overview
//!
//! The engine module provides:
//! - `PaginationEngine` - Spawns sessions for a page fetcher
//! - `StateStream` - The observable output of a session
//! - `LoadMore` - Handle for sending load-more signals
//!
//! Each session is a single task that owns the state. It publishes the
//! current state, lets both feedbacks observe it, then waits for the next
//! fetch outcome or load-more signal and folds it in with the reducer.
//! Events are therefore processed one at a time, always against the state
//! produced by the previous event.

mod types;

pub use types::{load_more_channel, EngineConfig, LoadMore, LoadMoreSignal, StateStream};

use crate::feedback::{FetchFeedback, TriggerFeedback};
use crate::pagination::{reduce, PageFetcher, PaginationState};
use futures::channel::mpsc;
use futures::{Stream, StreamExt};
use std::fmt::Debug;
use std::sync::Arc;
use tracing::{debug, info, info_span, trace, Instrument};

/// Spawns pagination sessions for one page fetcher
pub struct PaginationEngine<F> {
    fetcher: Arc<F>,
    config: EngineConfig,
}

impl<F> Clone for PaginationEngine<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            config: self.config.clone(),
        }
    }
}

impl<F> PaginationEngine<F> {
    /// Create an engine around a page fetcher
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            config: EngineConfig::default(),
        }
    }

    /// Set engine configuration
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Start a session at `initial_cursor`
    ///
    /// The first page is fetched immediately. Every signal on `load_more`
    /// that arrives while the session is idle requests one more page;
    /// signals arriving while a fetch runs are dropped.
    ///
    /// Must be called inside a tokio runtime unless a runtime handle is
    /// configured.
    pub fn run<C, T, L>(&self, initial_cursor: C, load_more: L) -> StateStream<C, T>
    where
        C: Clone + Debug + Send + Sync + 'static,
        T: Clone + Send + Sync + 'static,
        F: PageFetcher<C, T>,
        L: Stream<Item = ()> + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded();
        let span = info_span!("pagination", label = %self.config.label);
        let task = self.config.spawn(
            drive_session(
                PaginationState::new(initial_cursor),
                load_more,
                Arc::clone(&self.fetcher),
                self.config.clone(),
                tx,
            )
            .instrument(span),
        );
        StateStream::new(rx, task)
    }

    /// Run a new session for every cursor on `cursors`
    ///
    /// Each cursor resets pagination to a fresh seed state. The previous
    /// session is aborted along with its fetch, and none of its states are
    /// delivered after the reset. `load_more` is shared by all sessions and
    /// always feeds the current one.
    pub fn run_sessions<C, T, S, L>(&self, cursors: S, load_more: L) -> StateStream<C, T>
    where
        C: Clone + Debug + Send + Sync + 'static,
        T: Clone + Send + Sync + 'static,
        F: PageFetcher<C, T>,
        S: Stream<Item = C> + Send + 'static,
        L: Stream<Item = ()> + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded();
        let task = self
            .config
            .spawn(drive_sessions(self.clone(), cursors, load_more, tx));
        StateStream::new(rx, task)
    }
}

/// Paginate from `initial_cursor` with default configuration
pub fn paginate<C, T, F, L>(initial_cursor: C, load_more: L, fetcher: F) -> StateStream<C, T>
where
    C: Clone + Debug + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
    F: PageFetcher<C, T>,
    L: Stream<Item = ()> + Send + 'static,
{
    PaginationEngine::new(fetcher).run(initial_cursor, load_more)
}

/// Paginate, restarting from scratch on every cursor `cursors` emits
pub fn paginate_sessions<C, T, F, S, L>(cursors: S, load_more: L, fetcher: F) -> StateStream<C, T>
where
    C: Clone + Debug + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
    F: PageFetcher<C, T>,
    S: Stream<Item = C> + Send + 'static,
    L: Stream<Item = ()> + Send + 'static,
{
    PaginationEngine::new(fetcher).run_sessions(cursors, load_more)
}

/// Feedback loop for one session
async fn drive_session<C, T, F, L>(
    mut state: PaginationState<C, T>,
    load_more: L,
    fetcher: Arc<F>,
    config: EngineConfig,
    output: mpsc::UnboundedSender<PaginationState<C, T>>,
) where
    C: Clone + Debug + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
    F: PageFetcher<C, T>,
    L: Stream<Item = ()> + Send + 'static,
{
    let (results_tx, mut results) = tokio::sync::mpsc::unbounded_channel();
    let mut fetch = FetchFeedback::new(fetcher, results_tx).with_runtime(config.runtime.clone());
    let mut trigger = TriggerFeedback::new();
    let mut load_more = Box::pin(load_more);
    let mut signals_open = true;

    debug!(cursor = ?state.next_cursor, "session started");

    loop {
        if output.unbounded_send(state.clone()).is_err() {
            debug!("state observer gone, stopping session");
            break;
        }
        fetch.observe(&state);
        trigger.observe(&state);

        let event = loop {
            tokio::select! {
                biased;

                // The fetch feedback keeps a sender alive, so this never yields None
                Some(outcome) = results.recv() => {
                    if let Some(event) = fetch.accept(outcome) {
                        break event;
                    }
                }
                signal = load_more.next(), if signals_open => match signal {
                    Some(()) => {
                        if let Some(event) = trigger.filter() {
                            break event;
                        }
                    }
                    None => {
                        trace!("load-more signal ended");
                        signals_open = false;
                    }
                },
            }
        };

        debug!(
            event = event.kind(),
            elements = state.elements.len(),
            "reducing event"
        );
        state = reduce(state, event);
    }

    info!(
        honored = trigger.honored(),
        suppressed = trigger.suppressed(),
        "session finished"
    );
}

/// Switch-latest over sessions, one per cursor
async fn drive_sessions<C, T, F, S, L>(
    engine: PaginationEngine<F>,
    cursors: S,
    load_more: L,
    output: mpsc::UnboundedSender<PaginationState<C, T>>,
) where
    C: Clone + Debug + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
    F: PageFetcher<C, T>,
    S: Stream<Item = C> + Send + 'static,
    L: Stream<Item = ()> + Send + 'static,
{
    let mut cursors = Box::pin(cursors);
    let mut load_more = Box::pin(load_more);
    let mut cursors_open = true;
    let mut signals_open = true;
    let mut current: Option<(StateStream<C, T>, LoadMore)> = None;
    let mut sessions = 0u64;

    loop {
        if !cursors_open && current.is_none() {
            break;
        }

        tokio::select! {
            biased;

            cursor = cursors.next(), if cursors_open => match cursor {
                Some(cursor) => {
                    sessions += 1;
                    if current.is_some() {
                        info!(session = sessions, cursor = ?cursor, "resetting pagination session");
                    }
                    // Replacing the old stream aborts its task and in-flight fetch
                    let (handle, signal) = load_more_channel();
                    current = Some((engine.run(cursor, signal), handle));
                }
                None => cursors_open = false,
            },
            state = next_state(&mut current) => match state {
                Some(state) => {
                    if output.unbounded_send(state).is_err() {
                        break;
                    }
                }
                None => current = None,
            },
            signal = load_more.next(), if signals_open => match signal {
                Some(()) => {
                    if let Some((_, handle)) = &current {
                        handle.trigger();
                    }
                }
                None => signals_open = false,
            },
        }
    }
}

/// Next state of the current session, pending forever if there is none
async fn next_state<C, T>(
    current: &mut Option<(StateStream<C, T>, LoadMore)>,
) -> Option<PaginationState<C, T>> {
    match current {
        Some((states, _)) => states.next().await,
        None => std::future::pending().await,
    }
}
