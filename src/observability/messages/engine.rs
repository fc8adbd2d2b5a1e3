// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for composite stage lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * The level-gated per-stage hook (stage starting, leaf cancellation)
//! * Cancellation observed by a composite
//! * Tasks that ended abnormally inside a composite
//! * Children that stopped consuming before their input closed

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Output of the context's level-gated logging hook.
///
/// # Log Level
/// `debug!` - Emitted only when the execution context's log level is `Debug`
///
/// # Example
/// ```
/// use the_conduit::observability::messages::engine::StageLog;
///
/// let msg = StageLog {
///     stage: "Sequential/main",
///     message: &"starting",
/// };
///
/// assert_eq!(msg.to_string(), "[Sequential/main] starting");
/// ```
pub struct StageLog<'a> {
    pub stage: &'a str,
    pub message: &'a dyn Display,
}

impl Display for StageLog<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "[{}] {}", self.stage, self.message)
    }
}

impl StructuredLog for StageLog<'_> {
    fn log(&self) {
        tracing::debug!(stage = self.stage, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("stage", span_name = name, stage = self.stage)
    }
}

/// A composite saw cancellation and is tearing down its remaining tasks.
///
/// # Log Level
/// `info!` - Expected operational event
///
/// # Example
/// ```
/// use the_conduit::observability::messages::engine::StageCancelled;
///
/// let msg = StageCancelled {
///     stage: "Fanout/ingest",
///     pending_tasks: 4,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct StageCancelled<'a> {
    pub stage: &'a str,
    pub pending_tasks: usize,
}

impl Display for StageCancelled<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Stage '{}' cancelled: aborting {} pending tasks",
            self.stage, self.pending_tasks
        )
    }
}

impl StructuredLog for StageCancelled<'_> {
    fn log(&self) {
        tracing::info!(
            stage = self.stage,
            pending_tasks = self.pending_tasks,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "stage_cancelled",
            span_name = name,
            stage = self.stage,
            pending_tasks = self.pending_tasks,
        )
    }
}

/// A task spawned by a composite panicked.
///
/// The task's transports were dropped while unwinding, so the topology still
/// drains; whatever the task was holding is lost.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use the_conduit::observability::messages::engine::StageTaskFailed;
///
/// let error = std::io::Error::new(std::io::ErrorKind::Other, "boom");
/// let msg = StageTaskFailed {
///     stage: "Parallel/workers",
///     error: &error,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct StageTaskFailed<'a> {
    pub stage: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for StageTaskFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Task in stage '{}' failed: {}", self.stage, self.error)
    }
}

impl StructuredLog for StageTaskFailed<'_> {
    fn log(&self) {
        tracing::error!(
            stage = self.stage,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "stage_task_failed",
            span_name = name,
            stage = self.stage,
            error = %self.error,
        )
    }
}

/// A fanout child stopped reading before its input was closed.
///
/// # Log Level
/// `warn!` - The child is skipped for the rest of the run
///
/// # Example
/// ```
/// use the_conduit::observability::messages::engine::ChildInputClosed;
///
/// let msg = ChildInputClosed {
///     stage: "Fanout/ingest",
///     child: "reverse_text",
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct ChildInputClosed<'a> {
    pub stage: &'a str,
    pub child: &'a str,
}

impl Display for ChildInputClosed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Child '{}' of stage '{}' stopped consuming before its input closed; skipping it",
            self.child, self.stage
        )
    }
}

impl StructuredLog for ChildInputClosed<'_> {
    fn log(&self) {
        tracing::warn!(stage = self.stage, child = self.child, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "child_input_closed",
            span_name = name,
            stage = self.stage,
            child = self.child,
        )
    }
}
