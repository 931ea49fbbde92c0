//! Page fetcher trait
//!
//! The caller-supplied effect that loads one page for a cursor.

use super::types::Page;
use crate::error::Result;
use async_trait::async_trait;
use std::future::Future;

/// Loads a page of elements for a cursor
///
/// Invoked at most once per fetch activation. The returned future may be
/// dropped at any await point when the fetch is superseded, so it must not
/// rely on running to completion.
#[async_trait]
pub trait PageFetcher<C, T>: Send + Sync + 'static {
    /// Fetch the page starting at `cursor`
    async fn fetch_page(&self, cursor: C) -> Result<Page<C, T>>;
}

#[async_trait]
impl<C, T, F, Fut> PageFetcher<C, T> for F
where
    C: Send + 'static,
    T: Send + 'static,
    F: Fn(C) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Page<C, T>>> + Send + 'static,
{
    async fn fetch_page(&self, cursor: C) -> Result<Page<C, T>> {
        (self)(cursor).await
    }
}

