// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Diagrams of processor trees.

mod graph;

pub use graph::ProcessorGraph;
