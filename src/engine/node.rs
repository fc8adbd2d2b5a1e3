// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::engine::{ExecutionContext, Fanout, Input, Output, Parallel, Sequential};
use crate::traits::{Processor, ProcessorConfig, ProcessorKey, Traceable};

/// The four kinds of node a processor tree is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Fanout,
    Sequential,
    Parallel,
    /// A leaf built by a processor factory.
    Processor,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Fanout => "fanout",
            NodeKind::Sequential => "sequential",
            NodeKind::Parallel => "parallel",
            NodeKind::Processor => "processor",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node in a processor tree: one of the three composites, or a leaf.
///
/// Nodes are cheap to clone (every variant is an `Arc`), which is how a
/// composite hands a child to the task that runs it. Code that walks a tree
/// (serialization, graph rendering) matches on this enum rather than probing
/// trait objects.
pub enum ProcessorNode<E> {
    Fanout(Arc<Fanout<E>>),
    Sequential(Arc<Sequential<E>>),
    Parallel(Arc<Parallel<E>>),
    Leaf(Arc<dyn Processor<E>>),
}

impl<E> Clone for ProcessorNode<E> {
    fn clone(&self) -> Self {
        match self {
            ProcessorNode::Fanout(fanout) => ProcessorNode::Fanout(Arc::clone(fanout)),
            ProcessorNode::Sequential(seq) => ProcessorNode::Sequential(Arc::clone(seq)),
            ProcessorNode::Parallel(parallel) => ProcessorNode::Parallel(Arc::clone(parallel)),
            ProcessorNode::Leaf(leaf) => ProcessorNode::Leaf(Arc::clone(leaf)),
        }
    }
}

impl<E: Traceable> ProcessorNode<E> {
    pub fn fanout(chain_name: impl Into<String>, processors: Vec<ProcessorNode<E>>) -> Self {
        ProcessorNode::Fanout(Arc::new(Fanout::new(chain_name, processors)))
    }

    pub fn sequential(chain_name: impl Into<String>, processors: Vec<ProcessorNode<E>>) -> Self {
        ProcessorNode::Sequential(Arc::new(Sequential::new(chain_name, processors)))
    }

    pub fn parallel(chain_name: impl Into<String>, processors: Vec<ProcessorNode<E>>) -> Self {
        ProcessorNode::Parallel(Arc::new(Parallel::new(chain_name, processors)))
    }

    pub fn leaf<P: Processor<E> + 'static>(processor: P) -> Self {
        ProcessorNode::Leaf(Arc::new(processor))
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            ProcessorNode::Fanout(_) => NodeKind::Fanout,
            ProcessorNode::Sequential(_) => NodeKind::Sequential,
            ProcessorNode::Parallel(_) => NodeKind::Parallel,
            ProcessorNode::Leaf(_) => NodeKind::Processor,
        }
    }

    /// The caller-supplied chain name of a composite, or the leaf's own name.
    pub fn chain_name(&self) -> String {
        match self {
            ProcessorNode::Fanout(fanout) => fanout.chain_name().to_string(),
            ProcessorNode::Sequential(seq) => seq.chain_name().to_string(),
            ProcessorNode::Parallel(parallel) => parallel.chain_name().to_string(),
            ProcessorNode::Leaf(leaf) => leaf.name(),
        }
    }

    pub fn children(&self) -> &[ProcessorNode<E>] {
        match self {
            ProcessorNode::Fanout(fanout) => fanout.processors(),
            ProcessorNode::Sequential(seq) => seq.processors(),
            ProcessorNode::Parallel(parallel) => parallel.processors(),
            ProcessorNode::Leaf(_) => &[],
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            ProcessorNode::Leaf(_) => 1,
            _ => self.children().iter().map(ProcessorNode::leaf_count).sum(),
        }
    }

    fn as_processor(&self) -> &dyn Processor<E> {
        match self {
            ProcessorNode::Fanout(fanout) => fanout.as_ref(),
            ProcessorNode::Sequential(seq) => seq.as_ref(),
            ProcessorNode::Parallel(parallel) => parallel.as_ref(),
            ProcessorNode::Leaf(leaf) => leaf.as_ref(),
        }
    }
}

#[async_trait]
impl<E: Traceable> Processor<E> for ProcessorNode<E> {
    async fn execute(&self, ctx: ExecutionContext, input: Input<E>, output: Output<E>) {
        self.as_processor().execute(ctx, input, output).await
    }

    fn name(&self) -> String {
        self.as_processor().name()
    }

    fn config(&self) -> Option<ProcessorConfig> {
        self.as_processor().config()
    }

    fn key(&self) -> ProcessorKey {
        self.as_processor().key()
    }
}

impl<E: Traceable> fmt::Debug for ProcessorNode<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessorNode")
            .field("kind", &self.kind())
            .field("name", &self.name())
            .field("children", &self.children())
            .finish()
    }
}
