//! Replaying multicast channel.
//!
//! A timeline is an append-only list of events plus a finished flag, shared
//! through a `watch` channel. Each subscriber keeps its own cursor, so every
//! subscriber (including one that joins after the cycle ended) observes the
//! full sequence in the same order.

use futures_util::stream::{self, BoxStream, StreamExt};
use tokio::sync::watch;

#[derive(Debug)]
pub(crate) struct Timeline<T> {
    events: Vec<T>,
    finished: bool,
}

impl<T> Timeline<T> {
    pub(crate) fn last(&self) -> Option<&T> {
        self.events.last()
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Write side of a timeline. Only the producer holds it.
#[derive(Debug)]
pub(crate) struct TimelineSender<T> {
    tx: watch::Sender<Timeline<T>>,
}

pub(crate) fn channel<T>() -> (TimelineSender<T>, watch::Receiver<Timeline<T>>) {
    let (tx, rx) = watch::channel(Timeline {
        events: Vec::new(),
        finished: false,
    });
    (TimelineSender { tx }, rx)
}

impl<T> TimelineSender<T> {
    /// Appends an event. Ignored once the timeline is finished.
    pub(crate) fn publish(&self, event: T) {
        self.tx.send_modify(|timeline| {
            if !timeline.finished {
                timeline.events.push(event);
            }
        });
    }

    /// Marks the timeline finished; subscribers end after draining it.
    pub(crate) fn finish(&self) {
        self.tx.send_if_modified(|timeline| {
            let changed = !timeline.finished;
            timeline.finished = true;
            changed
        });
    }

    /// Resolves once every receiver has been dropped.
    pub(crate) async fn closed(&self) {
        self.tx.closed().await
    }
}

enum Step<T> {
    Emit(T),
    Wait,
    Done,
}

/// Turns a receiver into a stream replaying the timeline from the start.
pub(crate) fn replay<T>(rx: watch::Receiver<Timeline<T>>) -> BoxStream<'static, T>
where
    T: Clone + Send + Sync + 'static,
{
    stream::unfold((rx, 0usize), |(mut rx, cursor)| async move {
        loop {
            let step = {
                let timeline = rx.borrow_and_update();
                match timeline.events.get(cursor) {
                    Some(event) => Step::Emit(event.clone()),
                    None if timeline.finished => Step::Done,
                    None => Step::Wait,
                }
            };
            match step {
                Step::Emit(event) => return Some((event, (rx, cursor + 1))),
                Step::Done => return None,
                Step::Wait => {
                    // Sender dropped without finishing: nothing more can arrive.
                    if rx.changed().await.is_err() {
                        return None;
                    }
                }
            }
        }
    })
    .boxed()
}
