// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use super::{leaf_config, run_text_leaf, Transformed};
use crate::engine::{ExecutionContext, Input, Output};
use crate::item::TextItem;
use crate::traits::{Processor, ProcessorConfig};

pub const WORD_SPLITTER: &str = "word_splitter";

/// Emits one item per whitespace-separated word; blank input emits nothing.
pub struct WordSplitterProcessor {
    name: String,
}

impl WordSplitterProcessor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Processor<TextItem> for WordSplitterProcessor {
    async fn execute(&self, ctx: ExecutionContext, input: Input<TextItem>, output: Output<TextItem>) {
        run_text_leaf(self, ctx, input, output, |item| {
            let words = item
                .text
                .split_whitespace()
                .map(|word| item.derive(word))
                .collect();
            Ok(Transformed::Items(words))
        })
        .await
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn config(&self) -> Option<ProcessorConfig> {
        Some(leaf_config(WORD_SPLITTER, &[]))
    }
}
