// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Buffer of each fanout child's private input and output.
pub const FANOUT_CHILD_CAPACITY: usize = 200;
/// Single-item hand-off: sequential links, parallel child outputs, the fanout collector.
pub const SYNC_CAPACITY: usize = 1;
/// Entry and exit transports created by `ProcessorNode::spawn`.
pub const PIPELINE_IO_CAPACITY: usize = 200;
