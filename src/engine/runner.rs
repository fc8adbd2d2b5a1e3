// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use tokio::task::JoinHandle;

use crate::config::consts::PIPELINE_IO_CAPACITY;
use crate::engine::relay::recv_or_cancel;
use crate::engine::transport::{transport, Input, Output};
use crate::engine::{ExecutionContext, ProcessorNode};
use crate::traits::{Processor, Traceable};

/// A tree that has been started on its own task.
///
/// Items sent on `input` flow through the tree and come out of `output`.
/// Dropping `input` closes the pipeline's entry; `output` then yields `None`
/// once everything in flight has been flushed.
pub struct RunningPipeline<E> {
    pub input: Output<E>,
    pub output: Input<E>,
    pub handle: JoinHandle<()>,
}

impl<E: Traceable> ProcessorNode<E> {
    /// Start this tree on a background task with fresh entry and exit transports.
    pub fn spawn(&self, ctx: ExecutionContext) -> RunningPipeline<E> {
        let (input, entry) = transport(PIPELINE_IO_CAPACITY);
        let (exit, output) = transport(PIPELINE_IO_CAPACITY);

        let root = self.clone();
        let handle = tokio::spawn(async move { root.execute(ctx, entry, exit).await });

        RunningPipeline {
            input,
            output,
            handle,
        }
    }

    /// Push `items` through the tree and collect everything it emits.
    ///
    /// Items are fed from a separate task so a tree that emits more than it
    /// buffers cannot deadlock against the collector. On cancellation the
    /// result holds whatever made it out before the tree shut down.
    pub async fn run<I>(&self, ctx: ExecutionContext, items: I) -> Vec<E>
    where
        I: IntoIterator<Item = E>,
        I::IntoIter: Send + 'static,
    {
        let RunningPipeline {
            input,
            output,
            handle,
        } = self.spawn(ctx.clone());

        let items = items.into_iter();
        let feed_ctx = ctx.clone();
        let feeder = tokio::spawn(async move {
            for item in items {
                let sent = tokio::select! {
                    biased;
                    _ = feed_ctx.cancelled() => false,
                    sent = input.send(item) => sent.is_ok(),
                };
                if !sent {
                    break;
                }
            }
        });

        let mut collected = Vec::new();
        while let Some(item) = recv_or_cancel(&ctx, &output).await {
            collected.push(item);
        }

        if ctx.is_cancelled() {
            // A root that ignores cancellation would never close the output.
            feeder.abort();
            handle.abort();
            let _ = handle.await;
            while let Some(item) = output.try_recv() {
                collected.push(item);
            }
        } else {
            let _ = feeder.await;
            let _ = handle.await;
        }

        collected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::{collect, AddOneProcessor, StuckProcessor, TestItem};
    use std::time::Duration;

    #[tokio::test]
    async fn test_spawned_pipeline_streams_items() {
        let tree = ProcessorNode::sequential(
            "streaming",
            vec![ProcessorNode::leaf(AddOneProcessor::new("inc"))],
        );
        let running = tree.spawn(ExecutionContext::new());

        running.input.send(TestItem::new(41)).await.unwrap();
        let first = running.output.recv().await.unwrap();
        assert_eq!(first.value, 42);

        drop(running.input);
        assert!(running.output.recv().await.is_none());
        running.handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_run_collects_more_than_the_io_buffers_hold() {
        let tree = ProcessorNode::leaf(AddOneProcessor::new("inc"));
        let count = (PIPELINE_IO_CAPACITY * 3) as i64;

        let output = tree.run(ExecutionContext::new(), TestItem::many(0..count)).await;

        assert_eq!(collect(&output), (1..=count).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_run_returns_after_cancel_when_the_root_leaf_is_stuck() {
        let tree = ProcessorNode::leaf(StuckProcessor::new("stuck"));
        let ctx = ExecutionContext::new();
        let cancel = ctx.cancellation_token().clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            cancel.cancel();
        });

        let output = tokio::time::timeout(Duration::from_secs(2), tree.run(ctx, TestItem::many(0..3)))
            .await
            .expect("run should return once the run is cancelled");

        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn test_run_keeps_items_emitted_before_cancel() {
        let tree = ProcessorNode::leaf(AddOneProcessor::new("inc"));
        let ctx = ExecutionContext::new();
        ctx.cancellation_token().cancel();

        let output = tokio::time::timeout(Duration::from_secs(2), tree.run(ctx, TestItem::many(0..3)))
            .await
            .expect("a cancelled run must not hang");

        // Whatever got out is a prefix of the uncancelled result.
        let values = collect(&output);
        assert!(values.len() <= 3);
        assert_eq!(values, (1..=values.len() as i64).collect::<Vec<_>>());
    }
}
