// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for leaf processor events.
//!
//! This module contains message types for logging events related to:
//! * Items a leaf could not process
//! * Leaf instantiation through a factory

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A leaf failed to process one item and dropped it.
///
/// # Log Level
/// `warn!` - The item is lost, the stage keeps running
///
/// # Example
/// ```
/// use the_conduit::observability::messages::processor::ProcessorItemFailed;
///
/// let msg = ProcessorItemFailed {
///     processor: "shout",
///     reason: "unknown case type: sideways",
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct ProcessorItemFailed<'a> {
    pub processor: &'a str,
    pub reason: &'a str,
}

impl Display for ProcessorItemFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Processor '{}' dropped an item: {}",
            self.processor, self.reason
        )
    }
}

impl StructuredLog for ProcessorItemFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            processor = self.processor,
            reason = self.reason,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "processor_item_failed",
            span_name = name,
            processor = self.processor,
            reason = self.reason,
        )
    }
}

/// Processor instantiation failed.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use the_conduit::observability::messages::processor::ProcessorInstantiationFailed;
///
/// let msg = ProcessorInstantiationFailed {
///     processor: "unknown_processor",
///     reason: "Unknown local processor implementation",
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct ProcessorInstantiationFailed<'a> {
    pub processor: &'a str,
    pub reason: &'a str,
}

impl Display for ProcessorInstantiationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Failed to instantiate processor '{}': {}",
            self.processor, self.reason
        )
    }
}

impl StructuredLog for ProcessorInstantiationFailed<'_> {
    fn log(&self) {
        tracing::error!(
            processor = self.processor,
            reason = self.reason,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "processor_instantiation_failed",
            span_name = name,
            processor = self.processor,
            reason = self.reason,
        )
    }
}
