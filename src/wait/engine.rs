// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The event-driven waiter: drains a watch subscription against a predicate,
//! racing it with a deadline.

use crate::error::{Result, ToolkitError};
use futures::{Stream, StreamExt};
use kube::api::WatchEvent;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// Outcome of a bounded wait. Transport failures are errors, not verdicts.
#[derive(Debug, PartialEq, Eq)]
pub enum Verdict<T> {
    Ready(T),
    TimedOut,
}

/// Drain `events` in arrival order, applying `check` to each Added/Modified
/// snapshot until it produces a value or the deadline elapses.
///
/// The predicate is evaluated at most once per event. Deleted and Bookmark
/// events are skipped: a snapshot of an object on its way out must not
/// report Ready. An Error event or an exhausted stream is fatal; the wait is
/// never resumed. Whichever of the stream and the deadline resolves first
/// determines the outcome, and the loser is dropped with the subscription.
pub async fn drain_until<K, S, F, T>(
    events: S,
    mut check: F,
    timeout: Duration,
    what: &str,
) -> Result<Verdict<T>>
where
    S: Stream<Item = kube::Result<WatchEvent<K>>>,
    F: FnMut(&K) -> Option<T>,
{
    let deadline = sleep(timeout);
    tokio::pin!(events, deadline);

    loop {
        tokio::select! {
            _ = &mut deadline => {
                debug!("deadline elapsed while waiting for {what}");
                return Ok(Verdict::TimedOut);
            }
            item = events.next() => match item {
                Some(Ok(WatchEvent::Added(obj))) | Some(Ok(WatchEvent::Modified(obj))) => {
                    if let Some(out) = check(&obj) {
                        return Ok(Verdict::Ready(out));
                    }
                }
                Some(Ok(WatchEvent::Deleted(_))) | Some(Ok(WatchEvent::Bookmark(_))) => {}
                Some(Ok(WatchEvent::Error(e))) => {
                    return Err(ToolkitError::Watch(format!(
                        "error event while watching {what}: {e}"
                    )));
                }
                Some(Err(e)) => {
                    return Err(ToolkitError::Watch(format!(
                        "watch stream for {what} failed: {e}"
                    )));
                }
                None => {
                    return Err(ToolkitError::Watch(format!(
                        "watch stream for {what} closed unexpectedly"
                    )));
                }
            },
        }
    }
}
