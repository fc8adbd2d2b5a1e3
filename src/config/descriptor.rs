// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

use crate::config::ProcessorFactory;
use crate::engine::{NodeKind, ProcessorNode};
use crate::errors::PipelineError;
use crate::observability::messages::{config::InvalidPipelineNode, StructuredLog};
use crate::traits::{Processor, ProcessorConfig, Traceable};

/// Serialized form of a processor tree.
///
/// Composites carry `processors`; `processor` leaves carry an opaque `cfg`
/// that is handed to the [`ProcessorFactory`] as is.
///
/// ```json
/// {
///   "type": "sequential",
///   "name": "main",
///   "processors": [
///     { "type": "processor", "name": "shout", "cfg": { "impl": "change_text_case" } },
///     { "type": "parallel", "name": "workers", "processors": [] }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PipelineDescriptor {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cfg: Option<ProcessorConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub processors: Vec<PipelineDescriptor>,
}

impl PipelineDescriptor {
    pub fn composite(kind: NodeKind, name: impl Into<String>, processors: Vec<PipelineDescriptor>) -> Self {
        Self {
            kind,
            name: name.into(),
            cfg: None,
            processors,
        }
    }

    pub fn processor(name: impl Into<String>, cfg: Option<ProcessorConfig>) -> Self {
        Self {
            kind: NodeKind::Processor,
            name: name.into(),
            cfg,
            processors: Vec::new(),
        }
    }

    /// Build the tree depth first, failing on the first node that cannot be built.
    pub fn build<E: Traceable>(
        &self,
        factory: &dyn ProcessorFactory<E>,
    ) -> Result<ProcessorNode<E>, PipelineError> {
        let children = || -> Result<Vec<ProcessorNode<E>>, PipelineError> {
            self.processors.iter().map(|child| child.build(factory)).collect()
        };

        match self.kind {
            NodeKind::Fanout => Ok(ProcessorNode::fanout(&self.name, children()?)),
            NodeKind::Sequential => Ok(ProcessorNode::sequential(&self.name, children()?)),
            NodeKind::Parallel => Ok(ProcessorNode::parallel(&self.name, children()?)),
            NodeKind::Processor => {
                if !self.processors.is_empty() {
                    return Err(self.reject("a processor node cannot have child processors"));
                }
                let cfg = self.cfg.clone().unwrap_or_default();
                factory
                    .create(&self.name, &cfg)
                    .map(ProcessorNode::Leaf)
                    .map_err(|reason| self.reject(&reason))
            }
        }
    }

    fn reject(&self, reason: &str) -> PipelineError {
        InvalidPipelineNode {
            name: &self.name,
            reason,
        }
        .log();
        PipelineError::invalid(&self.name, reason)
    }
}

impl<E: Traceable> From<&ProcessorNode<E>> for PipelineDescriptor {
    fn from(node: &ProcessorNode<E>) -> Self {
        match node.kind() {
            NodeKind::Processor => PipelineDescriptor::processor(node.name(), node.config()),
            kind => PipelineDescriptor::composite(
                kind,
                node.chain_name(),
                node.children().iter().map(PipelineDescriptor::from).collect(),
            ),
        }
    }
}

impl<E: Traceable> ProcessorNode<E> {
    pub fn to_descriptor(&self) -> PipelineDescriptor {
        PipelineDescriptor::from(self)
    }

    pub fn to_json(&self) -> Result<String, PipelineError> {
        Ok(serde_json::to_string_pretty(&self.to_descriptor())?)
    }
}
