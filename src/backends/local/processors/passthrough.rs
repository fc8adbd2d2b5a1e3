// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use super::{leaf_config, run_text_leaf, Transformed};
use crate::engine::{ExecutionContext, Input, Output};
use crate::item::TextItem;
use crate::traits::{Processor, ProcessorConfig};

pub const PASSTHROUGH: &str = "passthrough";

/// Forwards items untouched. Counted as passthrough, not output, and leaves no trace.
pub struct PassthroughProcessor {
    name: String,
}

impl PassthroughProcessor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Processor<TextItem> for PassthroughProcessor {
    async fn execute(&self, ctx: ExecutionContext, input: Input<TextItem>, output: Output<TextItem>) {
        run_text_leaf(self, ctx, input, output, |item| Ok(Transformed::Passthrough(item))).await
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn config(&self) -> Option<ProcessorConfig> {
        Some(leaf_config(PASSTHROUGH, &[]))
    }
}
