// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // leaf processor backends
pub mod config;     // pipeline descriptors, config loading
pub mod engine;     // transports + composites
pub mod errors;     // error handling
pub mod item;       // the text payload used by the CLI
pub mod observability;
pub mod render;     // mermaid graphs of a tree
pub mod traits;     // processor + traceable abstractions
