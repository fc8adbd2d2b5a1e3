// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod change_text_case;
pub mod passthrough;
pub mod prefix_suffix_adder;
pub mod reverse_text;
pub mod token_counter;
pub mod word_splitter;

pub use change_text_case::*;
pub use passthrough::*;
pub use prefix_suffix_adder::*;
pub use reverse_text::*;
pub use token_counter::*;
pub use word_splitter::*;

use crate::engine::{ExecutionContext, Input, Output};
use crate::item::TextItem;
use crate::observability::messages::{processor::ProcessorItemFailed, StructuredLog};
use crate::traits::{cancelled, Processor, ProcessorConfig};

/// What a text leaf made of one input item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transformed {
    /// Zero or more new items replace the input.
    Items(Vec<TextItem>),
    /// The input goes on unchanged.
    Passthrough(TextItem),
}

impl Transformed {
    pub fn one(item: TextItem) -> Self {
        Transformed::Items(vec![item])
    }
}

/// Item loop shared by the local leaves.
///
/// Checks cancellation before each item, records the leaf's statistics, and
/// drops (after logging) any item `step` rejects. Returns when the input is
/// drained, the output loses its reader, or the run is cancelled; `output`
/// is closed on return.
pub(crate) async fn run_text_leaf<P, F>(
    processor: &P,
    ctx: ExecutionContext,
    input: Input<TextItem>,
    output: Output<TextItem>,
    step: F,
) where
    P: Processor<TextItem>,
    F: Fn(TextItem) -> Result<Transformed, String> + Send + Sync,
{
    let key = processor.key();

    while let Some(item) = input.recv().await {
        if cancelled::<TextItem, _>(&ctx, processor) {
            break;
        }
        ctx.track_input(&key);

        let emitted = match step(item) {
            Ok(Transformed::Items(mut items)) => {
                for item in items.iter_mut() {
                    ctx.track_output(&key, item);
                }
                items
            }
            Ok(Transformed::Passthrough(item)) => {
                ctx.track_passthrough(&key);
                vec![item]
            }
            Err(reason) => {
                ctx.track_failure(&key);
                ProcessorItemFailed {
                    processor: key.name(),
                    reason: &reason,
                }
                .log();
                continue;
            }
        };

        for item in emitted {
            if output.send(item).await.is_err() {
                return;
            }
        }
    }
}

/// Optional string option from a leaf's `cfg`.
pub(crate) fn string_option(cfg: &ProcessorConfig, key: &str) -> Result<Option<String>, String> {
    match cfg.get(key) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(value)) => Ok(Some(value.clone())),
        Some(other) => Err(format!("option '{}' must be a string, got {}", key, other)),
    }
}

/// The `cfg` a local leaf writes back out: its implementation key plus its options.
pub(crate) fn leaf_config(implementation: &str, options: &[(&str, serde_json::Value)]) -> ProcessorConfig {
    let mut cfg = ProcessorConfig::new();
    cfg.insert("impl".to_string(), serde_json::Value::from(implementation));
    for (key, value) in options {
        cfg.insert(key.to_string(), value.clone());
    }
    cfg
}
