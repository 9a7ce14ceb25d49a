//! Change notifications for live queries.
//!
//! # Design Principles
//!
//! - Subscribers are notified only after a write has committed
//! - A notification carries no data; subscribers re-read committed state
//! - Notifications coalesce: a slow subscriber sees the latest revision once

use tokio::sync::watch;

/// Revision counter shared by every live query of one store.
#[derive(Debug)]
pub struct LiveHub {
    revision: watch::Sender<u64>,
}

impl LiveHub {
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self { revision }
    }

    /// Returns a receiver that has already seen the current revision.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Bumps the revision. Must be called after commit.
    pub fn notify(&self) {
        self.revision
            .send_modify(|revision| *revision = revision.wrapping_add(1));
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Number of live receivers, for diagnostics and tests.
    pub fn subscriber_count(&self) -> usize {
        self.revision.receiver_count()
    }
}

impl Default for LiveHub {
    fn default() -> Self {
        Self::new()
    }
}
