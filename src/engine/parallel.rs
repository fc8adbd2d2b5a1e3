// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use tokio::task::JoinSet;

use crate::config::consts::SYNC_CAPACITY;
use crate::engine::relay::{discard, join_tasks, relay};
use crate::engine::transport::{transport, Input, Output};
use crate::engine::{ExecutionContext, ProcessorNode};
use crate::traits::{Processor, Traceable};

/// Load-balances one input stream over its children without duplication.
///
/// Every child reads from the same input; an item goes to whichever child
/// is ready for it first. There is no scheduler beyond that race. Each child
/// has its own output, relayed into the shared output by a merge task.
/// No ordering is promised across children. Once every child has returned,
/// whatever is left on the input is read and dropped.
pub struct Parallel<E> {
    chain_name: String,
    processors: Vec<ProcessorNode<E>>,
}

impl<E: Traceable> Parallel<E> {
    pub fn new(chain_name: impl Into<String>, processors: Vec<ProcessorNode<E>>) -> Self {
        Self {
            chain_name: chain_name.into(),
            processors,
        }
    }

    pub fn chain_name(&self) -> &str {
        &self.chain_name
    }

    pub fn processors(&self) -> &[ProcessorNode<E>] {
        &self.processors
    }
}

#[async_trait]
impl<E: Traceable> Processor<E> for Parallel<E> {
    async fn execute(&self, ctx: ExecutionContext, input: Input<E>, output: Output<E>) {
        let key = self.key();
        ctx.log(key.name(), &"starting");
        ctx.track_started(&key);

        if self.processors.is_empty() {
            ctx.track_finished(&key);
            output.close();
            return;
        }

        let mut tasks = JoinSet::new();

        for child in &self.processors {
            let (child_output, child_emitted) = transport(SYNC_CAPACITY);
            let child = child.clone();
            let child_ctx = ctx.clone();
            let shared_input = input.share();
            tasks.spawn(async move { child.execute(child_ctx, shared_input, child_output).await });

            let merge_ctx = ctx.clone();
            let merge_key = key.clone();
            tasks.spawn(relay(ctx.clone(), child_emitted, output.share(), move |item: &mut E| {
                merge_ctx.track_output(&merge_key, item)
            }));
        }

        join_tasks(&ctx, key.name(), &mut tasks).await;

        // Children that returned early leave the rest of the input unread.
        let discarded = discard(&ctx, &input).await;
        if discarded > 0 {
            ctx.log(key.name(), &format!("discarded {} items no child read", discarded));
        }

        ctx.track_finished(&key);
        output.close();
    }

    fn name(&self) -> String {
        format!("Parallel/{}", self.chain_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::{
        collect_sorted, DelayProcessor, FirstOnlyProcessor, RecordingProcessor, TestItem,
    };
    use std::time::Duration;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_each_item_goes_to_exactly_one_child() {
        let (left, left_seen) = RecordingProcessor::new("left");
        let (right, right_seen) = RecordingProcessor::new("right");
        let parallel = ProcessorNode::parallel(
            "workers",
            vec![ProcessorNode::leaf(left), ProcessorNode::leaf(right)],
        );

        let output = parallel
            .run(ExecutionContext::new(), TestItem::many([1, 2, 3, 4]))
            .await;

        let mut received: Vec<i64> = left_seen.lock().unwrap().clone();
        received.extend(right_seen.lock().unwrap().iter().copied());
        received.sort();

        assert_eq!(received, vec![1, 2, 3, 4]);
        assert_eq!(collect_sorted(&output), vec![1, 2, 3, 4]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_slow_children_share_the_load() {
        let parallel = ProcessorNode::parallel(
            "pool",
            (0..4)
                .map(|i| ProcessorNode::leaf(DelayProcessor::new(format!("worker_{}", i), 5)))
                .collect(),
        );

        let output = parallel.run(ExecutionContext::new(), TestItem::many(0..40)).await;

        assert_eq!(collect_sorted(&output), (0..40).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_zero_children_closes_output_immediately() {
        let parallel = Parallel::<TestItem>::new("empty", vec![]);
        let (_input_tx, input_rx) = transport(1);
        let (output_tx, output_rx) = transport(1);

        tokio::time::timeout(
            Duration::from_secs(1),
            parallel.execute(ExecutionContext::new(), input_rx, output_tx),
        )
        .await
        .expect("empty parallel should return immediately");

        assert!(output_rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_input_is_drained_after_children_quit_early() {
        let parallel = Parallel::new(
            "quitters",
            vec![
                ProcessorNode::leaf(FirstOnlyProcessor::new("a")),
                ProcessorNode::leaf(FirstOnlyProcessor::new("b")),
            ],
        );
        let (input_tx, input_rx) = transport(1);
        let (output_tx, output_rx) = transport(4);

        let running = tokio::spawn(async move {
            parallel.execute(ExecutionContext::new(), input_rx, output_tx).await
        });

        for item in TestItem::many(0..20) {
            tokio::time::timeout(Duration::from_secs(1), input_tx.send(item))
                .await
                .expect("parallel stopped reading its input")
                .unwrap();
        }
        drop(input_tx);
        running.await.unwrap();

        let mut emitted = Vec::new();
        while let Some(item) = output_rx.recv().await {
            emitted.push(item.value);
        }
        assert!(!emitted.is_empty() && emitted.len() <= 2, "{:?}", emitted);
    }
}
