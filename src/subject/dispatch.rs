//! # Asynchronous fan-out.
//!
//! [`Subject::notify_async`] drives every observer's `update` concurrently on the
//! calling task. Nothing is spawned: handlers interleave cooperatively, switching
//! only where a handler awaits.
//!
//! ## Architecture
//! ```text
//! notify_async()
//!     │
//!     ├──► update #0 ─┐
//!     ├──► update #1 ─┼──► drive (poll pending in index order) ──► [(index, Result)]
//!     └──► update #N ─┘                                               │
//!                                                                     ▼
//!                                            select_failure(FailureSelection)
//!                                                                     │
//!                                                      Ok(()) or exactly one Err
//! ```
//!
//! ## Rules
//! - The round covers the observers subscribed when it starts.
//! - A failing handler never stops the others; every handler reaches a terminal
//!   state before the call returns.
//! - Side effects of successful handlers persist even when the round fails.
//! - No cancellation: wrap the call (e.g. `tokio::time::timeout`) if needed.

use std::task::Poll;

use futures::future::{poll_fn, BoxFuture};
use futures::FutureExt;

use super::Subject;
use crate::config::FailureSelection;

/// Handler outcome tagged with its registration index, in completion order.
type Finished = Vec<(usize, anyhow::Result<()>)>;

impl<S: Send + Sync + 'static> Subject<S> {
    /// Notifies every observer concurrently and waits for all of them.
    ///
    /// Synchronous observers run to completion when first polled; asynchronous
    /// ones interleave at their own await points.
    ///
    /// # Errors
    /// One of the captured observer errors, unchanged, picked by
    /// [`SubjectConfig::failure_selection`](crate::SubjectConfig::failure_selection).
    pub async fn notify_async(&self) -> anyhow::Result<()> {
        let tasks: Vec<_> = self
            .observers
            .iter()
            .map(|observer| observer.call_async(self))
            .collect();
        let total = tasks.len();
        tracing::trace!(subject = %self.cfg.name, observers = total, "notify_async");

        let finished = drive(tasks).await;
        let failed = finished.iter().filter(|(_, r)| r.is_err()).count();

        match select_failure(finished, self.cfg.failure_selection) {
            Some((index, err)) => {
                tracing::debug!(
                    subject = %self.cfg.name,
                    observer = self.observers[index].name(),
                    index,
                    failed,
                    total,
                    "async round failed"
                );
                Err(err)
            }
            None => Ok(()),
        }
    }
}

/// Polls every pending task in index order until all are done.
async fn drive(tasks: Vec<BoxFuture<'_, anyhow::Result<()>>>) -> Finished {
    let mut slots: Vec<Option<_>> = tasks.into_iter().map(Some).collect();
    let mut finished = Vec::with_capacity(slots.len());

    poll_fn(|cx| {
        for (index, slot) in slots.iter_mut().enumerate() {
            if let Some(task) = slot {
                if let Poll::Ready(result) = task.poll_unpin(cx) {
                    finished.push((index, result));
                    *slot = None;
                }
            }
        }
        if finished.len() == slots.len() {
            Poll::Ready(())
        } else {
            Poll::Pending
        }
    })
    .await;

    finished
}

/// Reduces a finished round to at most one failure.
fn select_failure(
    finished: Finished,
    selection: FailureSelection,
) -> Option<(usize, anyhow::Error)> {
    let mut failures = finished
        .into_iter()
        .filter_map(|(index, result)| result.err().map(|err| (index, err)));

    match selection {
        FailureSelection::FirstScheduled => failures.min_by_key(|(index, _)| *index),
        FailureSelection::FirstCompleted => failures.next(),
    }
}
