// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use super::{leaf_config, run_text_leaf, Transformed};
use crate::engine::{ExecutionContext, Input, Output};
use crate::item::TextItem;
use crate::traits::{Processor, ProcessorConfig};

pub const REVERSE_TEXT: &str = "reverse_text";

/// Reverses each item's text, character by character.
pub struct ReverseTextProcessor {
    name: String,
}

impl ReverseTextProcessor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Processor<TextItem> for ReverseTextProcessor {
    async fn execute(&self, ctx: ExecutionContext, input: Input<TextItem>, output: Output<TextItem>) {
        run_text_leaf(self, ctx, input, output, |item| {
            let reversed: String = item.text.chars().rev().collect();
            Ok(Transformed::one(item.derive(reversed)))
        })
        .await
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn config(&self) -> Option<ProcessorConfig> {
        Some(leaf_config(REVERSE_TEXT, &[]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ProcessorNode;

    #[tokio::test]
    async fn test_reverses_each_item() {
        let leaf = ProcessorNode::leaf(ReverseTextProcessor::new("mirror"));

        let output = leaf
            .run(ExecutionContext::new(), ["hello", "héllo wörld", ""].map(TextItem::from))
            .await;

        let texts: Vec<_> = output.iter().map(|item| item.text.as_str()).collect();
        assert_eq!(texts, vec!["olleh", "dlröw olléh", ""]);
    }
}
