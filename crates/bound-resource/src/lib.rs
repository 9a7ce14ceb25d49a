//! # bound-resource
//!
//! Stale-while-revalidate reconciliation between a local cache and a remote
//! source, plus an incremental pagination state machine built on the same
//! fetch/save contract.
//!
//! ## Architecture
//!
//! ```text
//! SINGLE VALUE (network_bound_resource):
//!   local read → Loading(cached) → fetch → save → read back → Success(fresh)
//!                                    └─ failure ──────────────────→ Error(cached)
//!
//! PAGING (NextPageHandler):
//!   query_next_page → Loading → fetch(page) → save → Success (cursor += 1)
//!                                  └─ failure ─────→ Error (cursor kept)
//!   reset → Idle (cursor = 1, in-flight results discarded)
//! ```
//!
//! ## Principles
//!
//! - The local cache is the only source of data for consumers
//! - At most one fetch is in flight per resource or pager
//! - Every subscriber of one resource sees the same ordered events
//! - Failures become values (`Resource::Error`, `LoadMoreState::Error`), never panics
//!
//! ## Crate Structure
//!
//! - [`executor`] - Where asynchronous work runs
//! - [`resource`] - The `Resource<T>` view
//! - [`network_bound`] - The single-value reconciler
//! - [`paging`] - `LoadMoreState` and `NextPageHandler`

pub mod executor;
pub mod network_bound;
pub mod paging;
pub mod resource;
mod timeline;

#[cfg(test)]
mod tests;

use futures_util::stream::BoxStream;

pub use executor::{ExecutionContext, Task, TaskError, TokioExecutor};
pub use network_bound::{network_bound_resource, NetworkBoundResource};
pub use paging::{LoadMoreState, NextPageHandler, PageRequest, FIRST_PAGE};
pub use resource::{Resource, Status};

/// Boxed error used at the generic seams (local reads).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A local cache query.
///
/// Yields the current cached value (`None` when absent) and, for live sources,
/// a fresh value after every committed write.
pub type LocalStream<T> = BoxStream<'static, Result<Option<T>, BoxError>>;

/// The observable output of a reconciliation cycle.
pub type ResourceStream<T> = BoxStream<'static, Resource<T>>;
