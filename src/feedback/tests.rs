//! Tests for feedback module

use super::*;
use crate::error::{Error, Result};
use crate::pagination::{Page, PaginationEvent, PaginationState};
use futures::future::BoxFuture;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

fn idle(cursor: Option<u32>) -> PaginationState<u32, u32> {
    PaginationState {
        is_loading: false,
        next_cursor: cursor,
        elements: vec![],
        error: None,
    }
}

fn counting_fetcher(
    calls: Arc<AtomicUsize>,
    delay: Duration,
) -> impl Fn(u32) -> BoxFuture<'static, Result<Page<u32, u32>>> + Send + Sync + 'static {
    move |cursor: u32| -> BoxFuture<'static, Result<Page<u32, u32>>> {
        calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            if cursor == 99 {
                Err(Error::fetch("cursor 99 is poisoned"))
            } else {
                Ok(Page::new(Some(cursor + 1), vec![cursor]))
            }
        })
    }
}

// ============================================================================
// TriggerFeedback Tests
// ============================================================================

#[test]
fn test_trigger_starts_closed() {
    let mut trigger = TriggerFeedback::new();
    assert!(!trigger.is_open());
    assert!(trigger.filter::<u32, u32>().is_none());
    assert_eq!(trigger.suppressed(), 1);
}

#[test]
fn test_trigger_closed_while_loading() {
    let mut trigger = TriggerFeedback::new();
    trigger.observe(&PaginationState::<u32, u32>::new(0));
    assert!(!trigger.is_open());

    for _ in 0..5 {
        assert!(trigger.filter::<u32, u32>().is_none());
    }
    assert_eq!(trigger.honored(), 0);
    assert_eq!(trigger.suppressed(), 5);
}

#[test]
fn test_trigger_honors_first_signal_after_idle() {
    let mut trigger = TriggerFeedback::new();
    trigger.observe(&idle(Some(5)));
    assert!(trigger.is_open());

    let event = trigger.filter::<u32, u32>();
    assert_eq!(event, Some(PaginationEvent::LoadNextRequested));

    // Second signal before the loading state is observed is still dropped
    assert!(trigger.filter::<u32, u32>().is_none());
    assert_eq!(trigger.honored(), 1);
    assert_eq!(trigger.suppressed(), 1);
}

#[test]
fn test_trigger_closed_when_exhausted() {
    let mut trigger = TriggerFeedback::new();
    trigger.observe(&idle(None));
    assert!(!trigger.is_open());
    assert!(trigger.filter::<u32, u32>().is_none());
}

#[test]
fn test_trigger_reopens_after_failure() {
    let mut trigger = TriggerFeedback::new();
    let failed = PaginationState::new(70u32)
        .apply(PaginationEvent::<u32, u32>::failure(Error::EndOfData));
    trigger.observe(&failed);
    assert!(trigger.is_open());
}

// ============================================================================
// FetchFeedback Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_fetch_starts_on_loading_edge_only() {
    let calls = Arc::new(AtomicUsize::new(0));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut fetch = FetchFeedback::new(
        Arc::new(counting_fetcher(calls.clone(), Duration::from_millis(10))),
        tx,
    );

    let loading = PaginationState::<u32, u32>::new(3);
    assert!(fetch.observe(&loading));
    assert!(!fetch.observe(&loading));
    assert!(fetch.is_fetching());

    let outcome = rx.recv().await.unwrap();
    let event = fetch.accept(outcome).unwrap();
    assert_eq!(event, PaginationEvent::page(Page::new(Some(4), vec![3])));
    assert!(!fetch.is_fetching());
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Idle resets the edge, the next loading state starts a new fetch
    let next = loading.apply(event);
    assert!(!fetch.observe(&next));
    let next = next.apply(PaginationEvent::LoadNextRequested);
    assert!(fetch.observe(&next));
    assert!(fetch.is_fetching());

    // The fetcher runs on the spawned task, so wait for its outcome
    let event = fetch.accept(rx.recv().await.unwrap()).unwrap();
    assert_eq!(event, PaginationEvent::page(Page::new(Some(5), vec![4])));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_fetch_failure_becomes_event() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut fetch = FetchFeedback::new(
        Arc::new(counting_fetcher(Arc::default(), Duration::ZERO)),
        tx,
    );

    fetch.observe(&PaginationState::<u32, u32>::new(99));
    let event = fetch.accept(rx.recv().await.unwrap()).unwrap();
    assert_eq!(
        event,
        PaginationEvent::failure(Error::fetch("cursor 99 is poisoned"))
    );
}

#[tokio::test(start_paused = true)]
async fn test_superseded_fetch_never_reports() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut fetch = FetchFeedback::new(
        Arc::new(counting_fetcher(Arc::default(), Duration::from_secs(2))),
        tx,
    );

    fetch.start(1);
    let first = fetch.generation();
    tokio::time::sleep(Duration::from_secs(1)).await;
    fetch.start(2);
    assert!(fetch.generation() > first);

    tokio::time::sleep(Duration::from_secs(3)).await;
    let outcome = rx.recv().await.unwrap();
    assert_eq!(outcome.generation, fetch.generation());
    assert_eq!(outcome.result, Ok(Page::new(Some(3), vec![2])));
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_stale_outcome_rejected() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut fetch = FetchFeedback::new(
        Arc::new(counting_fetcher(Arc::default(), Duration::ZERO)),
        tx,
    );

    fetch.start(1);
    let queued = rx.recv().await.unwrap();
    fetch.cancel();

    assert!(fetch.accept(queued).is_none());
}

#[tokio::test(start_paused = true)]
async fn test_drop_aborts_in_flight_fetch() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut fetch = FetchFeedback::new(
        Arc::new(counting_fetcher(Arc::default(), Duration::from_secs(1))),
        tx,
    );

    fetch.start(1);
    drop(fetch);
    tokio::time::sleep(Duration::from_secs(2)).await;

    // Sender held by the aborted task is gone, nothing was sent
    assert!(rx.recv().await.is_none());
}
