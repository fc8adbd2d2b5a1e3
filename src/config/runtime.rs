// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::backends::local::LocalProcessorFactory;
use crate::config::{Config, ProcessorFactory};
use crate::engine::{ExecutionContext, ProcessorNode};
use crate::errors::PipelineError;
use crate::item::TextItem;
use crate::observability::messages::{config::PipelineBuilt, StructuredLog};
use crate::observability::stats::StatDb;
use crate::traits::{Processor, Traceable};

/// Everything needed to run a configured pipeline.
pub struct Runtime<E> {
    pub root: ProcessorNode<E>,
    pub context: ExecutionContext,
    /// Present when the config asked for statistics; also registered on `context`.
    pub stats: Option<Arc<StatDb>>,
}

/// Pipeline runtime builder - turns a loaded [`Config`] into a runnable tree.
///
/// # Examples
///
/// ```
/// use the_conduit::config::{Config, RunOptions, PipelineDescriptor, RuntimeBuilder};
/// use the_conduit::engine::NodeKind;
///
/// let config = Config {
///     options: RunOptions { stats: true, ..RunOptions::default() },
///     pipeline: PipelineDescriptor::composite(
///         NodeKind::Sequential,
///         "main",
///         vec![PipelineDescriptor::processor("reverse_text", None)],
///     ),
/// };
///
/// let runtime = RuntimeBuilder::from_config(&config).unwrap();
/// assert!(runtime.stats.is_some());
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Build a text pipeline with the local processor backend.
    pub fn from_config(cfg: &Config) -> Result<Runtime<TextItem>, PipelineError> {
        Self::with_factory::<TextItem>(cfg, &LocalProcessorFactory)
    }

    /// Build a pipeline whose leaves come from `factory`.
    pub fn with_factory<E: Traceable>(
        cfg: &Config,
        factory: &dyn ProcessorFactory<E>,
    ) -> Result<Runtime<E>, PipelineError> {
        let root = cfg.pipeline.build(factory)?;

        PipelineBuilt {
            root: &root.name(),
            leaf_count: root.leaf_count(),
        }
        .log();

        let mut context = ExecutionContext::new()
            .with_traces(cfg.options.traces)
            .with_log_level(cfg.options.log_level);

        let stats = cfg.options.stats.then(|| Arc::new(StatDb::new()));
        if let Some(stats) = &stats {
            context = context.with_stats(Arc::clone(stats));
        }

        Ok(Runtime {
            root,
            context,
            stats,
        })
    }
}
