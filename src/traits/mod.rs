// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod processor;
pub mod traceable;

pub use processor::{cancelled, Processor, ProcessorConfig, ProcessorKey};
pub use traceable::Traceable;
