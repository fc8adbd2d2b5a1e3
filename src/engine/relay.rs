// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Merge and shutdown discipline shared by the composite processors.
//!
//! Every blocking transport operation a composite performs goes through
//! [`recv_or_cancel`] or [`send_or_cancel`], which race the operation against
//! the run's cancellation token. Every task a composite spawns lives in a
//! `JoinSet` that is awaited with [`join_tasks`]: it returns once all tasks are
//! done, or aborts whatever is still running as soon as the run is cancelled.
//! Aborting a task drops its transports, so closure keeps propagating
//! downstream even when a leaf never returns on its own.

use tokio::task::{JoinError, JoinSet};

use crate::engine::transport::{Input, Output};
use crate::engine::ExecutionContext;
use crate::observability::messages::engine::{StageCancelled, StageTaskFailed};
use crate::observability::messages::StructuredLog;

/// Outcome of a cancellation-aware send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// The reader went away; the item was dropped.
    Closed,
    /// The run was cancelled before the send completed; the item was dropped.
    Cancelled,
}

/// Next item from `input`, or `None` on end-of-stream or cancellation.
pub async fn recv_or_cancel<E>(ctx: &ExecutionContext, input: &Input<E>) -> Option<E> {
    tokio::select! {
        biased;
        _ = ctx.cancelled() => None,
        item = input.recv() => item,
    }
}

pub async fn send_or_cancel<E>(ctx: &ExecutionContext, output: &Output<E>, item: E) -> Delivery {
    tokio::select! {
        biased;
        _ = ctx.cancelled() => Delivery::Cancelled,
        sent = output.send(item) => match sent {
            Ok(()) => Delivery::Sent,
            Err(_) => Delivery::Closed,
        },
    }
}

/// Copy `source` into `sink` until `source` is drained or the run is cancelled.
///
/// `on_item` sees every item before it is forwarded. Once `sink` loses its
/// reader the relay keeps reading `source` to the end and discards what it
/// reads, so the stage feeding `source` is never left blocked. Both
/// transports are released when the relay returns.
pub(crate) async fn relay<E, F>(ctx: ExecutionContext, source: Input<E>, sink: Output<E>, mut on_item: F)
where
    E: Send,
    F: FnMut(&mut E) + Send,
{
    let mut sink = Some(sink);
    while let Some(mut item) = recv_or_cancel(&ctx, &source).await {
        let Some(open) = &sink else { continue };
        on_item(&mut item);
        let delivery = send_or_cancel(&ctx, open, item).await;
        match delivery {
            Delivery::Sent => {}
            Delivery::Closed => sink = None,
            Delivery::Cancelled => return,
        }
    }
}

/// Read `input` to the end and throw the items away.
pub(crate) async fn discard<E>(ctx: &ExecutionContext, input: &Input<E>) -> usize {
    let mut discarded = 0;
    while recv_or_cancel(ctx, input).await.is_some() {
        discarded += 1;
    }
    discarded
}

/// Join barrier for the tasks of one composite invocation.
pub(crate) async fn join_tasks(ctx: &ExecutionContext, stage: &str, tasks: &mut JoinSet<()>) {
    loop {
        tokio::select! {
            biased;
            joined = tasks.join_next() => match joined {
                Some(result) => report(stage, result),
                None => return,
            },
            _ = ctx.cancelled() => {
                StageCancelled {
                    stage,
                    pending_tasks: tasks.len(),
                }
                .log();
                tasks.abort_all();
                while let Some(result) = tasks.join_next().await {
                    report(stage, result);
                }
                return;
            }
        }
    }
}

fn report(stage: &str, result: Result<(), JoinError>) {
    if let Err(error) = result {
        if error.is_panic() {
            StageTaskFailed {
                stage,
                error: &error,
            }
            .log();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::transport::transport;
    use std::time::Duration;

    #[tokio::test]
    async fn test_relay_applies_hook_and_closes_sink() {
        let ctx = ExecutionContext::new();
        let (source_tx, source_rx) = transport(4);
        let (sink_tx, sink_rx) = transport(4);

        for i in 1..=3 {
            source_tx.send(i).await.unwrap();
        }
        drop(source_tx);

        relay(ctx, source_rx, sink_tx, |item: &mut i32| *item *= 10).await;

        let mut seen = Vec::new();
        while let Some(item) = sink_rx.recv().await {
            seen.push(item);
        }
        assert_eq!(seen, vec![10, 20, 30]);
    }

    #[tokio::test]
    async fn test_relay_keeps_draining_after_sink_reader_leaves() {
        let ctx = ExecutionContext::new();
        let (source_tx, source_rx) = transport(1);
        let (sink_tx, sink_rx) = transport(1);
        drop(sink_rx);

        let forwarding = tokio::spawn(relay(ctx, source_rx, sink_tx, |_: &mut i32| {}));

        // Every send must land even though nothing downstream reads.
        for i in 0..10 {
            tokio::time::timeout(Duration::from_secs(1), source_tx.send(i))
                .await
                .expect("relay stopped reading its source")
                .unwrap();
        }
        drop(source_tx);

        tokio::time::timeout(Duration::from_secs(1), forwarding)
            .await
            .expect("relay should return once its source closes")
            .unwrap();
    }

    #[tokio::test]
    async fn test_recv_or_cancel_unblocks_on_cancel() {
        let ctx = ExecutionContext::new();
        let (_keep_open, input) = transport::<u8>(1);

        ctx.cancellation_token().cancel();
        let item = tokio::time::timeout(Duration::from_secs(1), recv_or_cancel(&ctx, &input))
            .await
            .expect("recv should not block once cancelled");
        assert_eq!(item, None);
    }

    #[tokio::test]
    async fn test_send_or_cancel_reports_each_outcome() {
        let ctx = ExecutionContext::new();
        let (output, input) = transport(1);

        assert_eq!(send_or_cancel(&ctx, &output, 1).await, Delivery::Sent);

        let cancelled = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            cancelled.cancellation_token().cancel();
        });
        // The transport is full, so only cancellation can finish this send.
        assert_eq!(send_or_cancel(&ctx, &output, 2).await, Delivery::Cancelled);

        drop(input);
        let fresh = ExecutionContext::new();
        assert_eq!(send_or_cancel(&fresh, &output, 3).await, Delivery::Closed);
    }

    #[tokio::test]
    async fn test_join_tasks_survives_panicking_task() {
        let ctx = ExecutionContext::new();
        let mut tasks = JoinSet::new();
        tasks.spawn(async { panic!("boom") });
        tasks.spawn(async {});

        join_tasks(&ctx, "test", &mut tasks).await;
        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn test_join_tasks_aborts_on_cancel() {
        let ctx = ExecutionContext::new();
        let mut tasks = JoinSet::new();
        tasks.spawn(std::future::pending::<()>());

        let cancel = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            cancel.cancellation_token().cancel();
        });

        tokio::time::timeout(Duration::from_secs(2), join_tasks(&ctx, "test", &mut tasks))
            .await
            .expect("cancelled join should not hang");
        assert!(tasks.is_empty());
    }
}
