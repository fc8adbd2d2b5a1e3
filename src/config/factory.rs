// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::traits::{Processor, ProcessorConfig, Traceable};

/// Builds the leaf for a `processor` node of a pipeline descriptor.
///
/// Returning `Err` rejects the node; the reason ends up in
/// [`PipelineError::InvalidPipelineType`](crate::errors::PipelineError).
/// Closures of the right shape are factories too:
///
/// ```
/// use std::sync::Arc;
/// use the_conduit::backends::local::ReverseTextProcessor;
/// use the_conduit::config::ProcessorFactory;
/// use the_conduit::item::TextItem;
/// use the_conduit::traits::{Processor, ProcessorConfig};
///
/// let factory = |name: &str, _cfg: &ProcessorConfig| -> Result<Arc<dyn Processor<TextItem>>, String> {
///     Ok(Arc::new(ReverseTextProcessor::new(name)))
/// };
/// let leaf = factory.create("mirror", &ProcessorConfig::new()).unwrap();
/// assert_eq!(leaf.name(), "mirror");
/// ```
pub trait ProcessorFactory<E: Traceable> {
    fn create(&self, name: &str, cfg: &ProcessorConfig) -> Result<Arc<dyn Processor<E>>, String>;
}

impl<E, F> ProcessorFactory<E> for F
where
    E: Traceable,
    F: Fn(&str, &ProcessorConfig) -> Result<Arc<dyn Processor<E>>, String>,
{
    fn create(&self, name: &str, cfg: &ProcessorConfig) -> Result<Arc<dyn Processor<E>>, String> {
        self(name, cfg)
    }
}
