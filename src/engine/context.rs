// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::observability::messages::{engine::StageLog, StructuredLog};
use crate::observability::stats::StatDb;
use crate::traits::{ProcessorKey, Traceable};

/// Verbosity of the per-stage logging hook.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    #[default]
    Disabled,
    Debug,
}

/// Everything a stage needs to know about the run it is part of.
///
/// The context is passed by value into every `execute` call and cloned for each
/// child, so a composite may hand a subtree a modified copy (for example with
/// tracing switched on) without affecting its siblings. Cloning is cheap: the
/// token and the statistics store are shared handles.
///
/// All tracking calls are no-ops when no [`StatDb`] is registered.
#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
    cancellation: CancellationToken,
    traces: bool,
    log_level: LogLevel,
    stats: Option<Arc<StatDb>>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn with_traces(mut self, enabled: bool) -> Self {
        self.traces = enabled;
        self
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    pub fn with_stats(mut self, stats: Arc<StatDb>) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Resolves once the run is cancelled.
    pub async fn cancelled(&self) {
        self.cancellation.cancelled().await
    }

    pub fn traces_enabled(&self) -> bool {
        self.traces
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn stats(&self) -> Option<&Arc<StatDb>> {
        self.stats.as_ref()
    }

    /// Level-gated logging hook. Silent unless the level is [`LogLevel::Debug`].
    pub fn log(&self, stage: &str, message: &dyn Display) {
        if self.log_level == LogLevel::Debug {
            StageLog { stage, message }.log();
        }
    }

    pub fn track_started(&self, key: &ProcessorKey) {
        if let Some(stats) = &self.stats {
            stats.get(key).track_started();
        }
    }

    pub fn track_finished(&self, key: &ProcessorKey) {
        if let Some(stats) = &self.stats {
            stats.get(key).track_finished();
        }
    }

    pub fn track_input(&self, key: &ProcessorKey) {
        if let Some(stats) = &self.stats {
            stats.get(key).track_input();
        }
    }

    /// Record an item leaving a stage, stamping the stage name on it when
    /// tracing is enabled.
    pub fn track_output<E: Traceable>(&self, key: &ProcessorKey, item: &mut E) {
        if self.traces {
            item.add_trace(key.name());
        }
        if let Some(stats) = &self.stats {
            stats.get(key).track_output();
        }
    }

    pub fn track_passthrough(&self, key: &ProcessorKey) {
        if let Some(stats) = &self.stats {
            stats.get(key).track_passthrough();
        }
    }

    pub fn track_failure(&self, key: &ProcessorKey) {
        if let Some(stats) = &self.stats {
            stats.get(key).track_failure();
        }
    }
}
