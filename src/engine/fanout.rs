// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use tokio::task::JoinSet;

use crate::config::consts::{FANOUT_CHILD_CAPACITY, SYNC_CAPACITY};
use crate::engine::relay::{join_tasks, recv_or_cancel, relay, send_or_cancel, Delivery};
use crate::engine::transport::{transport, Input, Output};
use crate::engine::{ExecutionContext, ProcessorNode};
use crate::observability::messages::{engine::ChildInputClosed, StructuredLog};
use crate::traits::{Processor, ProcessorKey, Traceable};

/// Broadcasts every input item to all of its children and merges their outputs.
///
/// ```text
///                 ┌─► [in 200] ─► child 0 ─► [out 200] ─┐
/// input ─► dispatcher                                    ├─► [collector 1] ─► drain ─► output
///                 └─► [in 200] ─► child 1 ─► [out 200] ─┘
/// ```
///
/// Each child gets a private input queue of [`FANOUT_CHILD_CAPACITY`] items, so
/// a child may fall that far behind before the dispatcher (and with it every
/// other child) has to wait. Items a single child emits keep their relative
/// order; interleaving between children is unspecified.
pub struct Fanout<E> {
    chain_name: String,
    processors: Vec<ProcessorNode<E>>,
}

impl<E: Traceable> Fanout<E> {
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
impl<E: Traceable> Processor<E> for Fanout<E> {
    async fn execute(&self, ctx: ExecutionContext, input: Input<E>, output: Output<E>) {
        let key = self.key();
        ctx.log(key.name(), &"starting");
        ctx.track_started(&key);

        if self.processors.is_empty() {
            ctx.track_finished(&key);
            output.close();
            return;
        }

        let (collector, collected) = transport(SYNC_CAPACITY);

        let mut drain = JoinSet::new();
        let track_ctx = ctx.clone();
        let track_key = key.clone();
        drain.spawn(relay(ctx.clone(), collected, output.share(), move |item: &mut E| {
            track_ctx.track_output(&track_key, item)
        }));

        let mut tasks = JoinSet::new();
        let mut child_inputs = Vec::with_capacity(self.processors.len());

        for child in &self.processors {
            let (child_input, child_reader) = transport(FANOUT_CHILD_CAPACITY);
            let (child_output, child_emitted) = transport(FANOUT_CHILD_CAPACITY);
            child_inputs.push((child.name(), child_input));

            let child = child.clone();
            let child_ctx = ctx.clone();
            tasks.spawn(async move { child.execute(child_ctx, child_reader, child_output).await });
            tasks.spawn(relay(ctx.clone(), child_emitted, collector.share(), |_: &mut E| {}));
        }

        tasks.spawn(dispatch(ctx.clone(), key.clone(), input, child_inputs));

        join_tasks(&ctx, key.name(), &mut tasks).await;

        // Every merge task has released its handle; this closes the collector.
        collector.close();
        join_tasks(&ctx, key.name(), &mut drain).await;

        ctx.track_finished(&key);
        output.close();
    }

    fn name(&self) -> String {
        format!("Fanout/{}", self.chain_name)
    }
}

/// Reads the fanout input and writes each item to every child in turn.
/// Returning drops `children`, which closes every child input.
async fn dispatch<E: Traceable>(
    ctx: ExecutionContext,
    key: ProcessorKey,
    input: Input<E>,
    mut children: Vec<(String, Output<E>)>,
) {
    while let Some(item) = recv_or_cancel(&ctx, &input).await {
        ctx.track_input(&key);
        if !broadcast(&ctx, &key, &mut children, item).await {
            return;
        }
    }
}

/// Returns `false` when the run was cancelled mid-broadcast. Children whose
/// input has been closed from the reading side are dropped from `children`.
async fn broadcast<E: Traceable>(
    ctx: &ExecutionContext,
    key: &ProcessorKey,
    children: &mut Vec<(String, Output<E>)>,
    item: E,
) -> bool {
    let mut gone = Vec::new();
    let last = children.len().saturating_sub(1);
    let mut item = Some(item);

    for (index, (_, child_input)) in children.iter().enumerate() {
        let copy = if index == last { item.take() } else { item.clone() };
        let Some(copy) = copy else { break };

        match send_or_cancel(ctx, child_input, copy).await {
            Delivery::Sent => {}
            Delivery::Closed => gone.push(index),
            Delivery::Cancelled => return false,
        }
    }

    for index in gone.into_iter().rev() {
        let (child, _) = children.remove(index);
        ChildInputClosed {
            stage: key.name(),
            child: &child,
        }
        .log();
    }

    true
}
