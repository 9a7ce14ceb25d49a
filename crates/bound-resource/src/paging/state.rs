//! Paging states and per-call outcomes.

use serde::{Deserialize, Serialize};

/// Progress of incremental paging, as published to observers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadMoreState {
    /// Nothing requested since creation or the last reset.
    #[default]
    Idle,
    /// A page fetch is in flight.
    Loading,
    /// The last page was fetched and saved.
    Success,
    /// The last page failed; the same page is retried on the next request.
    Error { message: String },
}

impl LoadMoreState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadMoreState::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            LoadMoreState::Error { message } => Some(message),
            _ => None,
        }
    }
}

/// What a single `query_next_page` call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    /// The page was fetched and saved.
    Completed { page: u32, has_more: bool },
    /// Fetching or saving the page failed; the cursor stays on `page`.
    Failed { page: u32, message: String },
    /// A reset happened while the page was in flight; its result was dropped.
    Discarded { page: u32 },
    /// Another call already has a page in flight.
    AlreadyLoading,
    /// The last page was reached; nothing was fetched.
    Exhausted,
}

impl PageRequest {
    /// True when this call dispatched a fetch.
    pub fn dispatched(&self) -> bool {
        matches!(
            self,
            PageRequest::Completed { .. } | PageRequest::Failed { .. } | PageRequest::Discarded { .. }
        )
    }
}
