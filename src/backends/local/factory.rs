// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use super::processors::*;
use crate::config::ProcessorFactory;
use crate::item::TextItem;
use crate::observability::messages::{processor::ProcessorInstantiationFailed, StructuredLog};
use crate::traits::{Processor, ProcessorConfig};

/// Factory for creating local (in-process) text processors.
pub struct LocalProcessorFactory;

impl LocalProcessorFactory {
    /// Create a leaf named `name` from its `cfg`.
    ///
    /// The `impl` option selects the implementation and defaults to the leaf
    /// name, so a leaf called `reverse_text` needs no `cfg` at all:
    /// - "change_text_case" -> ChangeTextCaseProcessor (`case`: upper|lower|proper|title)
    /// - "reverse_text" -> ReverseTextProcessor
    /// - "prefix_suffix_adder" -> PrefixSuffixAdderProcessor (`prefix` and/or `suffix`)
    /// - "token_counter" -> TokenCounterProcessor
    /// - "word_splitter" -> WordSplitterProcessor
    /// - "passthrough" -> PassthroughProcessor
    pub fn create_processor(
        name: &str,
        cfg: &ProcessorConfig,
    ) -> Result<Arc<dyn Processor<TextItem>>, String> {
        let implementation = string_option(cfg, "impl")?.unwrap_or_else(|| name.to_string());

        let created: Result<Arc<dyn Processor<TextItem>>, String> = match implementation.as_str() {
            CHANGE_TEXT_CASE => ChangeTextCaseProcessor::from_config(name, cfg)
                .map(|p| Arc::new(p) as Arc<dyn Processor<TextItem>>),
            REVERSE_TEXT => Ok(Arc::new(ReverseTextProcessor::new(name))),
            PREFIX_SUFFIX_ADDER => PrefixSuffixAdderProcessor::from_config(name, cfg)
                .map(|p| Arc::new(p) as Arc<dyn Processor<TextItem>>),
            TOKEN_COUNTER => Ok(Arc::new(TokenCounterProcessor::new(name))),
            WORD_SPLITTER => Ok(Arc::new(WordSplitterProcessor::new(name))),
            PASSTHROUGH => Ok(Arc::new(PassthroughProcessor::new(name))),
            other => Err(format!(
                "Unknown local processor implementation: '{}' (available: {})",
                other,
                Self::list_available_implementations().join(", ")
            )),
        };

        if let Err(reason) = &created {
            ProcessorInstantiationFailed {
                processor: name,
                reason,
            }
            .log();
        }
        created
    }

    /// List all available local processor implementations
    pub fn list_available_implementations() -> Vec<&'static str> {
        vec![
            CHANGE_TEXT_CASE,
            REVERSE_TEXT,
            PREFIX_SUFFIX_ADDER,
            TOKEN_COUNTER,
            WORD_SPLITTER,
            PASSTHROUGH,
        ]
    }
}

impl ProcessorFactory<TextItem> for LocalProcessorFactory {
    fn create(&self, name: &str, cfg: &ProcessorConfig) -> Result<Arc<dyn Processor<TextItem>>, String> {
        Self::create_processor(name, cfg)
    }
}
