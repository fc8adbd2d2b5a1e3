// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{leaf_config, run_text_leaf, Transformed};
use crate::engine::{ExecutionContext, Input, Output};
use crate::item::TextItem;
use crate::traits::{Processor, ProcessorConfig};

pub const TOKEN_COUNTER: &str = "token_counter";

#[derive(Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct TokenCount {
    pub char_count: usize,
    pub word_count: usize,
    pub line_count: usize,
}

impl TokenCount {
    pub fn of(text: &str) -> Self {
        Self {
            char_count: text.chars().count(),
            word_count: text.split_whitespace().count(),
            // An empty text still counts as one line.
            line_count: text.lines().count().max(1),
        }
    }
}

/// Replaces each item with a JSON summary of its character, word and line counts.
pub struct TokenCounterProcessor {
    name: String,
}

impl TokenCounterProcessor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Processor<TextItem> for TokenCounterProcessor {
    async fn execute(&self, ctx: ExecutionContext, input: Input<TextItem>, output: Output<TextItem>) {
        run_text_leaf(self, ctx, input, output, |item| {
            let summary = serde_json::to_string(&TokenCount::of(&item.text))
                .map_err(|e| format!("failed to serialize token count: {}", e))?;
            Ok(Transformed::one(item.derive(summary)))
        })
        .await
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn config(&self) -> Option<ProcessorConfig> {
        Some(leaf_config(TOKEN_COUNTER, &[]))
    }
}
