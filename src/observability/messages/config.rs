// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for pipeline loading and construction.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A pipeline config file was read and parsed.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_conduit::observability::messages::config::ConfigLoaded;
///
/// let msg = ConfigLoaded {
///     path: "pipelines/text.yaml",
///     format: "yaml",
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ConfigLoaded<'a> {
    pub path: &'a str,
    pub format: &'a str,
}

impl Display for ConfigLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Loaded {} pipeline config from '{}'", self.format, self.path)
    }
}

impl StructuredLog for ConfigLoaded<'_> {
    fn log(&self) {
        tracing::info!(path = self.path, format = self.format, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "config_loaded",
            span_name = name,
            path = self.path,
            format = self.format,
        )
    }
}

/// A processor tree was assembled from a descriptor.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_conduit::observability::messages::config::PipelineBuilt;
///
/// let msg = PipelineBuilt {
///     root: "Sequential/main",
///     leaf_count: 4,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct PipelineBuilt<'a> {
    pub root: &'a str,
    pub leaf_count: usize,
}

impl Display for PipelineBuilt<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Built pipeline '{}' with {} leaf processors",
            self.root, self.leaf_count
        )
    }
}

impl StructuredLog for PipelineBuilt<'_> {
    fn log(&self) {
        tracing::info!(root = self.root, leaf_count = self.leaf_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "pipeline_built",
            span_name = name,
            root = self.root,
            leaf_count = self.leaf_count,
        )
    }
}

/// A descriptor node could not be turned into a processor.
///
/// # Log Level
/// `error!` - Construction aborts
///
/// # Example
/// ```
/// use the_conduit::observability::messages::config::InvalidPipelineNode;
///
/// let msg = InvalidPipelineNode {
///     name: "mystery",
///     reason: "unknown node type",
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct InvalidPipelineNode<'a> {
    pub name: &'a str,
    pub reason: &'a str,
}

impl Display for InvalidPipelineNode<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Pipeline node '{}' is invalid: {}", self.name, self.reason)
    }
}

impl StructuredLog for InvalidPipelineNode<'_> {
    fn log(&self) {
        tracing::error!(node = self.name, reason = self.reason, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "invalid_pipeline_node",
            span_name = name,
            node = self.name,
            reason = self.reason,
        )
    }
}
