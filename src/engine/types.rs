//! Engine types
//!
//! Configuration, the load-more handle and the output stream.

use crate::pagination::PaginationState;
use futures::channel::mpsc;
use futures::Stream;
use pin_project_lite::pin_project;
use serde::Deserialize;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Configuration for a pagination engine
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Label recorded on the session's tracing span
    pub label: String,
    /// Runtime the session and its fetches are spawned on
    #[serde(skip)]
    pub runtime: Option<Handle>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            label: "pagination".to_string(),
            runtime: None,
        }
    }
}

impl EngineConfig {
    /// Create a new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the span label
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Spawn on a specific runtime instead of the ambient one
    #[must_use]
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Spawn a task on the configured runtime
    pub(crate) fn spawn<F>(&self, task: F) -> JoinHandle<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        match &self.runtime {
            Some(handle) => handle.spawn(task),
            None => tokio::spawn(task),
        }
    }
}

/// Sender half of a load-more signal
#[derive(Debug, Clone)]
pub struct LoadMore {
    tx: mpsc::UnboundedSender<()>,
}

impl LoadMore {
    /// Request the next page
    ///
    /// Returns `false` once nothing is listening anymore.
    pub fn trigger(&self) -> bool {
        self.tx.unbounded_send(()).is_ok()
    }

    /// Check if the receiving side has gone away
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving half of a load-more signal
pub type LoadMoreSignal = mpsc::UnboundedReceiver<()>;

/// Create a load-more handle and the signal stream it feeds
pub fn load_more_channel() -> (LoadMore, LoadMoreSignal) {
    let (tx, rx) = mpsc::unbounded();
    (LoadMore { tx }, rx)
}

pin_project! {
    /// Live sequence of pagination states
    ///
    /// Yields one state per processed event and never fails. Dropping the
    /// stream stops the session, cancelling any fetch in flight.
    pub struct StateStream<C, T> {
        #[pin]
        states: mpsc::UnboundedReceiver<PaginationState<C, T>>,
        task: Option<JoinHandle<()>>,
    }

    impl<C, T> PinnedDrop for StateStream<C, T> {
        fn drop(this: Pin<&mut Self>) {
            if let Some(task) = this.project().task.take() {
                task.abort();
            }
        }
    }
}

impl<C, T> StateStream<C, T> {
    pub(crate) fn new(
        states: mpsc::UnboundedReceiver<PaginationState<C, T>>,
        task: JoinHandle<()>,
    ) -> Self {
        Self {
            states,
            task: Some(task),
        }
    }
}

impl<C, T> Stream for StateStream<C, T> {
    type Item = PaginationState<C, T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.project().states.poll_next(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.states.size_hint()
    }
}

impl<C, T> std::fmt::Debug for StateStream<C, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateStream")
            .field("running", &self.task.as_ref().is_some_and(|t| !t.is_finished()))
            .finish_non_exhaustive()
    }
}
