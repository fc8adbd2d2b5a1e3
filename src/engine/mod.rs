// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The streaming core: transports, the execution context, the three
//! composites and the node type that nests them.

pub mod context;
pub mod fanout;
pub mod node;
pub mod parallel;
pub mod relay;
pub mod runner;
pub mod sequential;
pub mod transport;

pub use context::{ExecutionContext, LogLevel};
pub use fanout::Fanout;
pub use node::{NodeKind, ProcessorNode};
pub use parallel::Parallel;
pub use runner::RunningPipeline;
pub use sequential::Sequential;
pub use transport::{transport, Input, Output, TransportClosed};
