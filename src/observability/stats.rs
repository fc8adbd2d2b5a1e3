// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Per-processor counters and timestamps.
//!
//! A [`StatDb`] is shared between every stage of a run (and may be shared
//! across runs) through the [`ExecutionContext`](crate::engine::ExecutionContext).
//! Entries are created lazily on first use and keyed by [`ProcessorKey`], so two
//! instances of the same leaf keep separate counters.

use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::traits::ProcessorKey;

#[derive(Debug, Default)]
pub struct StatDb {
    items: RwLock<HashMap<ProcessorKey, Arc<Stats>>>,
}

impl StatDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters for `key`, created on first access.
    pub fn get(&self, key: &ProcessorKey) -> Arc<Stats> {
        if let Some(stats) = self
            .items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
        {
            return Arc::clone(stats);
        }

        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            items
                .entry(key.clone())
                .or_insert_with(|| Arc::new(Stats::new(key.name()))),
        )
    }

    pub fn len(&self) -> usize {
        self.items.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Point-in-time copy of every entry, keyed `"<name>/<address>"`.
    pub fn snapshot(&self) -> BTreeMap<String, StatsSnapshot> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(key, stats)| (key.to_string(), stats.snapshot()))
            .collect()
    }

    /// Snapshot of the entry whose processor name is `name`, if exactly one exists.
    pub fn find_by_name(&self, name: &str) -> Option<StatsSnapshot> {
        let items = self.items.read().unwrap_or_else(PoisonError::into_inner);
        let mut matches = items.iter().filter(|(key, _)| key.name() == name);
        match (matches.next(), matches.next()) {
            (Some((_, stats)), None) => Some(stats.snapshot()),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for StatDb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.snapshot().serialize(serializer)
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Timestamps {
    last_input: Option<SystemTime>,
    last_output: Option<SystemTime>,
    last_passthrough: Option<SystemTime>,
    last_failure: Option<SystemTime>,
    started: Option<SystemTime>,
    finished: Option<SystemTime>,
}

/// Live counters for one processor.
#[derive(Debug)]
pub struct Stats {
    name: String,
    input: AtomicU64,
    output: AtomicU64,
    passthrough: AtomicU64,
    failed: AtomicU64,
    times: Mutex<Timestamps>,
}

impl Stats {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            input: AtomicU64::new(0),
            output: AtomicU64::new(0),
            passthrough: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            times: Mutex::new(Timestamps::default()),
        }
    }

    fn stamp(&self, update: impl FnOnce(&mut Timestamps, SystemTime)) {
        let mut times = self.times.lock().unwrap_or_else(PoisonError::into_inner);
        update(&mut times, SystemTime::now());
    }

    pub fn track_started(&self) {
        self.stamp(|t, now| t.started = Some(now));
    }

    pub fn track_finished(&self) {
        self.stamp(|t, now| t.finished = Some(now));
    }

    pub fn track_input(&self) {
        self.input.fetch_add(1, Ordering::Relaxed);
        self.stamp(|t, now| t.last_input = Some(now));
    }

    pub fn track_output(&self) {
        self.output.fetch_add(1, Ordering::Relaxed);
        self.stamp(|t, now| t.last_output = Some(now));
    }

    pub fn track_passthrough(&self) {
        self.passthrough.fetch_add(1, Ordering::Relaxed);
        self.stamp(|t, now| t.last_passthrough = Some(now));
    }

    pub fn track_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
        self.stamp(|t, now| t.last_failure = Some(now));
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let times = *self.times.lock().unwrap_or_else(PoisonError::into_inner);
        StatsSnapshot {
            name: self.name.clone(),
            input: self.input.load(Ordering::Relaxed),
            output: self.output.load(Ordering::Relaxed),
            passthrough: self.passthrough.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            last_input: epoch_millis(times.last_input),
            last_output: epoch_millis(times.last_output),
            last_passthrough: epoch_millis(times.last_passthrough),
            last_failure: epoch_millis(times.last_failure),
            started: epoch_millis(times.started),
            finished: epoch_millis(times.finished),
        }
    }
}

/// Serializable copy of [`Stats`]. Timestamps are milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub name: String,
    pub input: u64,
    pub output: u64,
    pub passthrough: u64,
    pub failed: u64,
    pub last_input: Option<u64>,
    pub last_output: Option<u64>,
    pub last_passthrough: Option<u64>,
    pub last_failure: Option<u64>,
    pub started: Option<u64>,
    pub finished: Option<u64>,
}

fn epoch_millis(time: Option<SystemTime>) -> Option<u64> {
    time.and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_millis() as u64)
}
