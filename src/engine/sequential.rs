// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use tokio::task::JoinSet;

use crate::config::consts::SYNC_CAPACITY;
use crate::engine::relay::{join_tasks, relay};
use crate::engine::transport::{transport, Input, Output};
use crate::engine::{ExecutionContext, ProcessorNode};
use crate::traits::{Processor, Traceable};

/// Chains its children into a single lane: child `i`'s output is child `i + 1`'s input.
///
/// ```text
/// input ─► feeder ─► [entry] ─► child 0 ─► [link] ─► child 1 ─► [link] ─► drain ─► output
/// ```
///
/// Links hold a single item, so the chain moves in near lock-step. Closure
/// needs no orchestration: each child closes its output when its input runs
/// dry, and that ripples down the chain to the drain task. If a child stops
/// reading early, the feeder keeps draining the pipeline input and drops what
/// it reads.
pub struct Sequential<E> {
    chain_name: String,
    processors: Vec<ProcessorNode<E>>,
}

impl<E: Traceable> Sequential<E> {
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
impl<E: Traceable> Processor<E> for Sequential<E> {
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

        let (entry, mut upstream) = transport(SYNC_CAPACITY);
        let input_ctx = ctx.clone();
        let input_key = key.clone();
        tasks.spawn(relay(ctx.clone(), input, entry, move |_: &mut E| {
            input_ctx.track_input(&input_key)
        }));

        for child in &self.processors {
            let (child_output, downstream) = transport(SYNC_CAPACITY);
            let child = child.clone();
            let child_ctx = ctx.clone();
            tasks.spawn(async move { child.execute(child_ctx, upstream, child_output).await });
            upstream = downstream;
        }

        let output_ctx = ctx.clone();
        let output_key = key.clone();
        tasks.spawn(relay(ctx.clone(), upstream, output.share(), move |item: &mut E| {
            output_ctx.track_output(&output_key, item)
        }));

        join_tasks(&ctx, key.name(), &mut tasks).await;

        ctx.track_finished(&key);
        output.close();
    }

    fn name(&self) -> String {
        format!("Sequential/{}", self.chain_name)
    }
}
