//! Single-value stale-while-revalidate reconciler.
//!
//! # Cycle (strict order)
//!
//! 1. Read the local cache and publish `Loading(cached)` (`Loading(None)` when
//!    the read fails)
//! 2. Dispatch the fetch on the execution context
//! 3. While it runs, re-publish fresher cache values as `Loading`
//! 4. On success, await the save, then publish `Success` with the value read
//!    back from a fresh local query
//! 5. On any failure, publish `Error` with the last cached value
//!
//! Exactly one terminal event is published and the cycle ends.
//!
//! # Cancellation
//!
//! When the handle and every subscriber are dropped, the cycle future is
//! dropped. The fetch task is cancelled with it and the save never runs.

use std::fmt;
use std::future::Future;

use futures_util::StreamExt;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::executor::ExecutionContext;
use crate::resource::Resource;
use crate::timeline::{self, Timeline, TimelineSender};
use crate::{LocalStream, ResourceStream};

/// Handle to one reconciliation cycle.
///
/// The cycle starts as soon as the handle is created. Subscribers share it:
/// each one replays the identical sequence of events from the beginning.
#[derive(Debug)]
pub struct NetworkBoundResource<T> {
    rx: watch::Receiver<Timeline<Resource<T>>>,
}

impl<T> NetworkBoundResource<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Subscribes to the cycle's events, starting from the first one.
    pub fn subscribe(&self) -> ResourceStream<T> {
        timeline::replay(self.rx.clone())
    }

    /// Converts the handle into its event stream.
    pub fn into_stream(self) -> ResourceStream<T> {
        timeline::replay(self.rx)
    }

    /// The most recent event, if any was published yet.
    pub fn latest(&self) -> Option<Resource<T>> {
        self.rx.borrow().last().cloned()
    }

    /// True once the terminal event was published (or the cycle was abandoned).
    pub fn is_finished(&self) -> bool {
        self.rx.borrow().is_finished()
    }
}

/// Starts a reconciliation cycle and returns its handle.
///
/// - `load_from_local` opens a cache query. It is called once at the start
///   and once more to read the saved value back.
/// - `fetch` requests the fresh value from the remote source.
/// - `save_call_result` persists the fetched value into the cache.
pub fn network_bound_resource<T, R, C, L, F, FFut, FE, S, SFut, SE>(
    ctx: &C,
    load_from_local: L,
    fetch: F,
    save_call_result: S,
) -> NetworkBoundResource<T>
where
    T: Clone + Send + Sync + 'static,
    R: Send + 'static,
    C: ExecutionContext,
    L: Fn() -> LocalStream<T> + Send + Sync + 'static,
    F: FnOnce() -> FFut + Send + 'static,
    FFut: Future<Output = Result<R, FE>> + Send + 'static,
    FE: fmt::Display + Send + 'static,
    S: FnOnce(R) -> SFut + Send + 'static,
    SFut: Future<Output = Result<(), SE>> + Send + 'static,
    SE: fmt::Display + Send + 'static,
{
    let (tx, rx) = timeline::channel();
    let cycle_ctx = ctx.clone();

    ctx.run(async move {
        tokio::select! {
            _ = reconcile(&cycle_ctx, &tx, load_from_local, fetch, save_call_result) => {}
            _ = tx.closed() => {
                debug!("all subscribers dropped, abandoning reconciliation cycle");
            }
        }
        tx.finish();
    })
    .detach();

    NetworkBoundResource { rx }
}

async fn reconcile<T, R, C, L, F, FFut, FE, S, SFut, SE>(
    ctx: &C,
    timeline: &TimelineSender<Resource<T>>,
    load_from_local: L,
    fetch: F,
    save_call_result: S,
) where
    T: Clone + Send + Sync + 'static,
    R: Send + 'static,
    C: ExecutionContext,
    L: Fn() -> LocalStream<T>,
    F: FnOnce() -> FFut,
    FFut: Future<Output = Result<R, FE>> + Send + 'static,
    FE: fmt::Display + Send + 'static,
    S: FnOnce(R) -> SFut,
    SFut: Future<Output = Result<(), SE>>,
    SE: fmt::Display,
{
    let mut local = load_from_local();
    let mut local_open = true;
    let mut latest = match local.next().await {
        Some(Ok(value)) => value,
        Some(Err(e)) => {
            // Still revalidate: the save and read-back may repair the cache.
            warn!(error = %e, "local read failed before fetch");
            local_open = false;
            None
        }
        None => None,
    };
    timeline.publish(Resource::loading(latest.clone()));

    let mut task = ctx.run(fetch());
    let fetched = loop {
        tokio::select! {
            result = &mut task => break result,
            next = local.next(), if local_open => match next {
                Some(Ok(value)) => {
                    latest = value;
                    timeline.publish(Resource::loading(latest.clone()));
                }
                Some(Err(e)) => warn!(error = %e, "local read failed while fetching"),
                None => local_open = false,
            },
        }
    };

    let value = match fetched {
        Ok(Ok(value)) => value,
        Ok(Err(e)) => {
            warn!(error = %e, "fetch failed");
            timeline.publish(Resource::error(e.to_string(), latest));
            return;
        }
        Err(e) => {
            warn!(error = %e, "fetch task failed");
            timeline.publish(Resource::error(e.to_string(), latest));
            return;
        }
    };

    if let Err(e) = save_call_result(value).await {
        warn!(error = %e, "saving fetched result failed");
        timeline.publish(Resource::error(e.to_string(), latest));
        return;
    }

    // Read back through a fresh query rather than waiting on the live one:
    // a save that writes nothing (an empty page) never triggers a re-emit.
    drop(local);
    let refreshed = load_from_local().next().await.unwrap_or(Ok(None));

    match refreshed {
        Ok(value) => timeline.publish(Resource::success(value)),
        Err(e) => {
            warn!(error = %e, "local read-back failed after save");
            timeline.publish(Resource::error(e.to_string(), latest));
        }
    }
}
