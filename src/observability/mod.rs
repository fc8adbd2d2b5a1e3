// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability: structured log messages and the statistics store.
//!
//! Message types follow a struct-based pattern with a `Display` implementation,
//! which keeps log text out of the engine code and gives every event the same
//! shape wherever it is emitted.
//!
//! * `messages::engine` - composite stage lifecycle and shutdown events
//! * `messages::processor` - leaf processor events
//! * `messages::config` - pipeline loading and construction events
//! * `stats` - per-processor counters exposed through the execution context
//!
//! # Usage
//!
//! ```rust
//! use the_conduit::observability::messages::{engine::StageCancelled, StructuredLog};
//!
//! StageCancelled {
//!     stage: "Fanout/ingest",
//!     pending_tasks: 3,
//! }
//! .log();
//! ```

pub mod messages;
pub mod stats;
