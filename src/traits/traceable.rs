// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Capability every item flowing through a pipeline must provide.
///
/// When tracing is enabled on the [`ExecutionContext`](crate::engine::ExecutionContext),
/// each composite appends its own name to the item as the item leaves it, so an
/// output item ends up carrying the ordered list of stages it passed through,
/// innermost first.
///
/// Items are cloned when a [`Fanout`](crate::engine::Fanout) duplicates them and
/// moved across tokio tasks, hence the `Clone + Send + 'static` bound.
pub trait Traceable: Clone + Send + 'static {
    fn add_trace(&mut self, stage: &str);
}
