//! Execution context: where reconciliation and paging work runs.
//!
//! The reconciler and the pager never spawn directly. They hand work to an
//! [`ExecutionContext`] and await the returned [`Task`], which keeps the
//! pipeline independent from a particular runtime and lets tests choose a
//! current-thread or multi-thread scheduler.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::{JoinError, JoinHandle};

/// Errors surfaced when awaiting a [`Task`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// The work panicked. Carries the panic message when it was a string.
    #[error("task panicked: {0}")]
    Panicked(String),

    /// The work was cancelled before completing (runtime shutdown or abort).
    #[error("task cancelled")]
    Cancelled,

    /// No runtime is available to run work on.
    #[error("no async runtime available: {0}")]
    NoRuntime(String),
}

impl From<JoinError> for TaskError {
    fn from(err: JoinError) -> Self {
        if !err.is_panic() {
            return TaskError::Cancelled;
        }
        let payload = err.into_panic();
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        TaskError::Panicked(message)
    }
}

/// Abstracts "where work runs".
///
/// `run` schedules `work` off the caller's synchronous path. Two independently
/// scheduled pieces of work are unordered unless the caller awaits one before
/// scheduling the other.
pub trait ExecutionContext: Clone + Send + Sync + 'static {
    /// Schedules `work` and returns a handle to its completion.
    fn run<F>(&self, work: F) -> Task<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static;
}

/// Handle to scheduled work.
///
/// Awaiting yields the work's output, or a [`TaskError`] if it panicked or was
/// cancelled. Dropping a `Task` cancels the work; call [`Task::detach`] to let
/// it run to completion unobserved.
#[derive(Debug)]
pub struct Task<T> {
    handle: Option<JoinHandle<T>>,
}

impl<T> Task<T> {
    fn new(handle: JoinHandle<T>) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    /// Lets the work keep running after this handle is dropped.
    pub fn detach(mut self) {
        self.handle.take();
    }

    /// Requests cancellation of the work.
    pub fn abort(&self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }

    /// Returns true once the work has finished (successfully or not).
    pub fn is_finished(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| handle.is_finished())
            .unwrap_or(true)
    }
}

impl<T> Future for Task<T> {
    type Output = Result<T, TaskError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.get_mut().handle.as_mut() {
            Some(handle) => Pin::new(handle).poll(cx).map_err(TaskError::from),
            None => Poll::Ready(Err(TaskError::Cancelled)),
        }
    }
}

impl<T> Drop for Task<T> {
    fn drop(&mut self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }
}

/// Execution context backed by a tokio runtime handle.
#[derive(Debug, Clone)]
pub struct TokioExecutor {
    handle: Handle,
}

impl TokioExecutor {
    /// Creates an executor that spawns onto the given runtime.
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Creates an executor bound to the runtime the caller is running on.
    pub fn try_current() -> Result<Self, TaskError> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|e| TaskError::NoRuntime(e.to_string()))
    }

    /// Returns the underlying runtime handle.
    pub fn handle(&self) -> &Handle {
        &self.handle
    }
}

impl ExecutionContext for TokioExecutor {
    fn run<F>(&self, work: F) -> Task<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        Task::new(self.handle.spawn(work))
    }
}
