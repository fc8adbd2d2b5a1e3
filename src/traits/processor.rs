// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;

use crate::engine::{ExecutionContext, Input, Output};
use crate::traits::Traceable;

/// Opaque, processor-specific configuration carried by leaf descriptors.
pub type ProcessorConfig = HashMap<String, serde_json::Value>;

/// The contract every pipeline stage satisfies, leaf or composite.
///
/// An implementation of `execute` must:
///
/// - read every item from `input` until it yields `None`
/// - send zero or more items per input item to `output`
/// - let `output` go (drop it) once, after its last send, when `input` is exhausted
///
/// Dropping `output` is what closes it. Holding on to it, or returning before
/// `input` is drained, stalls everything downstream of the stage.
///
/// Leaves must poll [`ExecutionContext::is_cancelled`] (or [`cancelled`]) at
/// least once per item and stop sending once cancellation is observed.
#[async_trait]
pub trait Processor<E: Traceable>: Send + Sync {
    async fn execute(&self, ctx: ExecutionContext, input: Input<E>, output: Output<E>);

    fn name(&self) -> String;

    /// Configuration written back out when a tree is serialized.
    fn config(&self) -> Option<ProcessorConfig> {
        None
    }

    /// Identity used to key statistics: the name plus the instance address.
    fn key(&self) -> ProcessorKey {
        ProcessorKey::new(self.name(), (self as *const Self).cast::<()>() as usize)
    }
}

/// Identity of one processor instance inside a live tree.
///
/// Two leaves with the same name are still distinct stages, so the address of
/// the instance is part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcessorKey {
    name: String,
    address: usize,
}

impl ProcessorKey {
    pub fn new(name: impl Into<String>, address: usize) -> Self {
        Self {
            name: name.into(),
            address,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ProcessorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{:#x}", self.name, self.address)
    }
}

/// Returns `true` when the pipeline has been cancelled and the calling leaf
/// should stop sending. Logs through the context's level-gated hook.
pub fn cancelled<E, P>(ctx: &ExecutionContext, processor: &P) -> bool
where
    E: Traceable,
    P: Processor<E> + ?Sized,
{
    if !ctx.is_cancelled() {
        return false;
    }

    let name = processor.name();
    ctx.log(&name, &format_args!("pipeline has been cancelled, stopping {}", name));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::{PassthroughProcessor, TestItem};

    #[test]
    fn test_key_distinguishes_instances_with_same_name() {
        let first = PassthroughProcessor::new("same");
        let second = PassthroughProcessor::new("same");

        let first_key = Processor::<TestItem>::key(&first);
        let second_key = Processor::<TestItem>::key(&second);

        assert_eq!(first_key.name(), second_key.name());
        assert_ne!(first_key, second_key);
        assert_eq!(first_key, Processor::<TestItem>::key(&first));
    }

    #[test]
    fn test_key_display_contains_name_and_address() {
        let key = ProcessorKey::new("Fanout/ingest", 0x2a);
        assert_eq!(key.to_string(), "Fanout/ingest/0x2a");
    }

    #[test]
    fn test_cancelled_reflects_token() {
        let ctx = ExecutionContext::new();
        let processor = PassthroughProcessor::new("leaf");

        assert!(!cancelled::<TestItem, _>(&ctx, &processor));
        ctx.cancellation_token().cancel();
        assert!(cancelled::<TestItem, _>(&ctx, &processor));
    }
}
