//! Incremental pagination over a fetch/save pair.
//!
//! - [`state`] - `LoadMoreState` published to observers and `PageRequest` outcomes
//! - [`handler`] - `NextPageHandler`, the page cursor state machine

mod handler;
mod state;

pub use handler::{NextPageHandler, FIRST_PAGE};
pub use state::{LoadMoreState, PageRequest};
