// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human-readable line and
//! [`StructuredLog`] to emit it through `tracing` with its fields attached at
//! the level appropriate for the event.
//!
//! * `engine` - composite stage lifecycle and shutdown events
//! * `processor` - leaf processor events
//! * `config` - pipeline loading and construction events

use tracing::Span;

pub mod config;
pub mod engine;
pub mod processor;

/// A message that knows its own log level and structured fields.
pub trait StructuredLog {
    /// Emit the message as a `tracing` event.
    fn log(&self);

    /// A span carrying the same fields, for work done on behalf of the event.
    fn span(&self, name: &str) -> Span;
}
