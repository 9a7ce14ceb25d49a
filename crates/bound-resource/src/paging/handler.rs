//! Page cursor state machine.
//!
//! ```text
//! Idle/Success/Error --query_next_page--> Loading --ok, more pages--> Success (cursor += 1)
//!                                                 --ok, last page---> Success (exhausted)
//!                                                 --failure---------> Error   (cursor kept)
//! any --reset--> Idle (cursor = FIRST_PAGE, in-flight result discarded)
//! ```
//!
//! The cursor, the in-flight flag and the published state live under one
//! mutex, so concurrent callers on a multi-threaded runtime still see exactly
//! one dispatch per page and a totally ordered sequence of transitions.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::{self, BoxFuture, FutureExt};
use futures_util::stream::{self, BoxStream, StreamExt};
use parking_lot::Mutex;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use super::state::{LoadMoreState, PageRequest};
use crate::executor::ExecutionContext;

/// Index of the first page requested after creation or a reset.
pub const FIRST_PAGE: u32 = 1;

/// Buffered transitions per observer before it starts lagging.
const STATE_CHANNEL_CAPACITY: usize = 64;

type FetchPage<R> = Box<dyn Fn(u32) -> BoxFuture<'static, Result<R, String>> + Send + Sync>;
type SavePage<R> = Box<dyn Fn(R) -> BoxFuture<'static, Result<(), String>> + Send + Sync>;
type HasMorePages<R> = Box<dyn Fn(&R) -> bool + Send + Sync>;

#[derive(Debug)]
struct PagingState {
    current: LoadMoreState,
    next_page: u32,
    in_flight: bool,
    exhausted: bool,
    /// Bumped by `reset`; a completion from an older generation is dropped.
    generation: u64,
}

struct Inner<R, C> {
    ctx: C,
    fetch: FetchPage<R>,
    save: SavePage<R>,
    has_more_pages: HasMorePages<R>,
    state: Mutex<PagingState>,
    events: broadcast::Sender<LoadMoreState>,
}

/// Drives repeated page fetches into the cache.
///
/// Only state transitions are published; the fetched data becomes visible
/// through the cache the consumer already observes. Cloning yields another
/// handle to the same pager.
pub struct NextPageHandler<R, C> {
    inner: Arc<Inner<R, C>>,
}

impl<R, C> Clone for NextPageHandler<R, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R, C> fmt::Debug for NextPageHandler<R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NextPageHandler")
            .field("state", &*self.inner.state.lock())
            .finish_non_exhaustive()
    }
}

impl<R, C> NextPageHandler<R, C>
where
    R: Send + 'static,
    C: ExecutionContext,
{
    /// Creates a pager positioned on [`FIRST_PAGE`] in the `Idle` state.
    ///
    /// - `save_call_result` persists a fetched page into the cache.
    /// - `fetch` requests a page by number.
    /// - `process_has_more_pages` decides, from a fetched page, whether the
    ///   cursor advances or paging is exhausted.
    pub fn new<S, SFut, SE, F, FFut, FE, H>(
        ctx: C,
        save_call_result: S,
        fetch: F,
        process_has_more_pages: H,
    ) -> Self
    where
        S: Fn(R) -> SFut + Send + Sync + 'static,
        SFut: Future<Output = Result<(), SE>> + Send + 'static,
        SE: fmt::Display + Send + 'static,
        F: Fn(u32) -> FFut + Send + Sync + 'static,
        FFut: Future<Output = Result<R, FE>> + Send + 'static,
        FE: fmt::Display + Send + 'static,
        H: Fn(&R) -> bool + Send + Sync + 'static,
    {
        let fetch: FetchPage<R> = Box::new(move |page| {
            fetch(page)
                .map(|result| result.map_err(|e| e.to_string()))
                .boxed()
        });
        let save: SavePage<R> = Box::new(move |value| {
            save_call_result(value)
                .map(|result| result.map_err(|e| e.to_string()))
                .boxed()
        });
        let (events, _) = broadcast::channel(STATE_CHANNEL_CAPACITY);

        Self {
            inner: Arc::new(Inner {
                ctx,
                fetch,
                save,
                has_more_pages: Box::new(process_has_more_pages),
                state: Mutex::new(PagingState {
                    current: LoadMoreState::Idle,
                    next_page: FIRST_PAGE,
                    in_flight: false,
                    exhausted: false,
                    generation: 0,
                }),
                events,
            }),
        }
    }

    /// Fetches and saves the page under the cursor.
    ///
    /// Returns without dispatching when a page is already in flight or the
    /// last page was reached. Otherwise resolves after the resulting state
    /// was published. The page load keeps running if the returned future is
    /// dropped.
    pub async fn query_next_page(&self) -> PageRequest {
        let (page, generation) = {
            let mut state = self.inner.state.lock();
            if state.in_flight {
                debug!(page = state.next_page, "page already loading, ignoring request");
                return PageRequest::AlreadyLoading;
            }
            if state.exhausted {
                debug!(page = state.next_page, "no more pages, ignoring request");
                return PageRequest::Exhausted;
            }
            state.in_flight = true;
            self.inner.transition(&mut state, LoadMoreState::Loading);
            (state.next_page, state.generation)
        };

        debug!(page, "loading page");
        let (done_tx, done_rx) = oneshot::channel();
        let inner = Arc::clone(&self.inner);
        self.inner
            .ctx
            .run(async move {
                let outcome = inner.load_page(page, generation).await;
                let _ = done_tx.send(outcome);
            })
            .detach();

        done_rx.await.unwrap_or(PageRequest::Discarded { page })
    }

    /// Returns to `Idle` on the first page and invalidates any in-flight page.
    pub fn reset(&self) {
        let mut state = self.inner.state.lock();
        state.generation = state.generation.wrapping_add(1);
        state.next_page = FIRST_PAGE;
        state.in_flight = false;
        state.exhausted = false;
        self.inner.transition(&mut state, LoadMoreState::Idle);
        info!("paging reset to first page");
    }

    /// Live stream of states: the current one, then every transition in order.
    pub fn as_stream(&self) -> BoxStream<'static, LoadMoreState> {
        let (current, rx) = {
            let state = self.inner.state.lock();
            (state.current.clone(), self.inner.events.subscribe())
        };

        let transitions = stream::unfold(rx, |mut rx| async move {
            loop {
                match rx.recv().await {
                    Ok(state) => return Some((state, rx)),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "paging observer lagged, skipping transitions");
                    }
                    Err(RecvError::Closed) => return None,
                }
            }
        });

        stream::once(future::ready(current)).chain(transitions).boxed()
    }

    /// The currently published state.
    pub fn state(&self) -> LoadMoreState {
        self.inner.state.lock().current.clone()
    }

    /// The page the next dispatch will request.
    pub fn next_page(&self) -> u32 {
        self.inner.state.lock().next_page
    }

    /// True once a fetched page reported that no more pages exist.
    pub fn is_exhausted(&self) -> bool {
        self.inner.state.lock().exhausted
    }
}

impl<R, C> Inner<R, C>
where
    R: Send + 'static,
    C: ExecutionContext,
{
    /// Publishes `next` while the state lock is held.
    fn transition(&self, state: &mut PagingState, next: LoadMoreState) {
        state.current = next.clone();
        // No receivers is fine: the state is still readable via `state()`.
        let _ = self.events.send(next);
    }

    fn is_current(&self, generation: u64) -> bool {
        self.state.lock().generation == generation
    }

    async fn load_page(self: Arc<Self>, page: u32, generation: u64) -> PageRequest {
        let fetched = match self.ctx.run((self.fetch)(page)).await {
            Ok(result) => result,
            Err(e) => Err(e.to_string()),
        };

        let value = match fetched {
            Ok(value) => value,
            Err(message) => return self.fail(page, generation, message),
        };

        if !self.is_current(generation) {
            info!(page, "discarding page fetched before reset");
            return PageRequest::Discarded { page };
        }

        let has_more = (self.has_more_pages)(&value);
        let pager = Arc::clone(&self);
        let save = async move {
            // A reset may land between the check above and this task starting.
            if !pager.is_current(generation) {
                return None;
            }
            Some((pager.save)(value).await)
        };
        let saved = match self.ctx.run(save).await {
            Ok(Some(result)) => result,
            Ok(None) => {
                info!(page, "discarding page, paging was reset before save");
                return PageRequest::Discarded { page };
            }
            Err(e) => Err(e.to_string()),
        };
        if let Err(message) = saved {
            return self.fail(page, generation, message);
        }

        let mut state = self.state.lock();
        if state.generation != generation {
            info!(page, "page saved but paging was reset meanwhile");
            return PageRequest::Discarded { page };
        }
        state.in_flight = false;
        if has_more {
            state.next_page = state.next_page.saturating_add(1);
        } else {
            state.exhausted = true;
            info!(page, "last page reached");
        }
        self.transition(&mut state, LoadMoreState::Success);
        debug!(page, has_more, next_page = state.next_page, "page loaded");
        PageRequest::Completed { page, has_more }
    }

    fn fail(&self, page: u32, generation: u64, message: String) -> PageRequest {
        let mut state = self.state.lock();
        if state.generation != generation {
            debug!(page, "ignoring failure of page fetched before reset");
            return PageRequest::Discarded { page };
        }
        warn!(page, error = %message, "page load failed");
        state.in_flight = false;
        self.transition(
            &mut state,
            LoadMoreState::Error {
                message: message.clone(),
            },
        );
        PageRequest::Failed { page, message }
    }
}
