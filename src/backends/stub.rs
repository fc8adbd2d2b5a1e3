// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

use crate::engine::{ExecutionContext, Input, Output};
use crate::traits::{cancelled, Processor, Traceable};

/// Integer payload used by engine tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestItem {
    pub value: i64,
    pub trace: Vec<String>,
}

impl TestItem {
    pub fn new(value: i64) -> Self {
        Self {
            value,
            trace: Vec::new(),
        }
    }

    pub fn many(values: impl IntoIterator<Item = i64>) -> Vec<TestItem> {
        values.into_iter().map(TestItem::new).collect()
    }
}

impl Traceable for TestItem {
    fn add_trace(&mut self, stage: &str) {
        self.trace.push(stage.to_string());
    }
}

pub fn collect(items: &[TestItem]) -> Vec<i64> {
    items.iter().map(|item| item.value).collect()
}

pub fn collect_sorted(items: &[TestItem]) -> Vec<i64> {
    let mut values = collect(items);
    values.sort_unstable();
    values
}

/// Shared leaf loop: apply `step` to every item until the input closes or
/// the run is cancelled.
async fn drive<P, F>(processor: &P, ctx: &ExecutionContext, input: Input<TestItem>, output: Output<TestItem>, mut step: F)
where
    P: Processor<TestItem>,
    F: FnMut(TestItem) -> TestItem + Send,
{
    while let Some(item) = input.recv().await {
        if cancelled::<TestItem, _>(ctx, processor) {
            break;
        }
        if output.send(step(item)).await.is_err() {
            break;
        }
    }
}

/// Forwards items unchanged.
pub struct PassthroughProcessor {
    name: String,
}

impl PassthroughProcessor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Processor<TestItem> for PassthroughProcessor {
    async fn execute(&self, ctx: ExecutionContext, input: Input<TestItem>, output: Output<TestItem>) {
        drive(self, &ctx, input, output, |item| item).await
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

pub struct AddOneProcessor {
    name: String,
}

impl AddOneProcessor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Processor<TestItem> for AddOneProcessor {
    async fn execute(&self, ctx: ExecutionContext, input: Input<TestItem>, output: Output<TestItem>) {
        drive(self, &ctx, input, output, |mut item| {
            item.value += 1;
            item
        })
        .await
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

/// Forwards items unchanged and records every value it receives.
pub struct RecordingProcessor {
    name: String,
    seen: Arc<Mutex<Vec<i64>>>,
}

impl RecordingProcessor {
    pub fn new(name: impl Into<String>) -> (Self, Arc<Mutex<Vec<i64>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let processor = Self {
            name: name.into(),
            seen: Arc::clone(&seen),
        };
        (processor, seen)
    }
}

#[async_trait]
impl Processor<TestItem> for RecordingProcessor {
    async fn execute(&self, ctx: ExecutionContext, input: Input<TestItem>, output: Output<TestItem>) {
        let seen = Arc::clone(&self.seen);
        drive(self, &ctx, input, output, move |item| {
            seen.lock().unwrap().push(item.value);
            item
        })
        .await
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

/// Forwards items after a short delay derived from the item value, so runs
/// are jittery but reproducible.
pub struct DelayProcessor {
    name: String,
    max_delay_ms: u64,
}

impl DelayProcessor {
    pub fn new(name: impl Into<String>, max_delay_ms: u64) -> Self {
        Self {
            name: name.into(),
            max_delay_ms,
        }
    }

    fn delay_for(&self, value: i64) -> Duration {
        let spread = value.unsigned_abs().wrapping_mul(31) + self.name.len() as u64;
        Duration::from_millis(spread % (self.max_delay_ms + 1))
    }
}

#[async_trait]
impl Processor<TestItem> for DelayProcessor {
    async fn execute(&self, ctx: ExecutionContext, input: Input<TestItem>, output: Output<TestItem>) {
        while let Some(item) = input.recv().await {
            if cancelled::<TestItem, _>(&ctx, self) {
                break;
            }
            tokio::time::sleep(self.delay_for(item.value)).await;
            if output.send(item).await.is_err() {
                break;
            }
        }
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

/// Never reads its input and never closes its output on its own.
pub struct StuckProcessor {
    name: String,
}

impl StuckProcessor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Processor<TestItem> for StuckProcessor {
    async fn execute(&self, _ctx: ExecutionContext, _input: Input<TestItem>, _output: Output<TestItem>) {
        std::future::pending::<()>().await
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

/// Reads nothing until its gate is opened, then forwards everything.
pub struct GatedProcessor {
    name: String,
    gate: Arc<Notify>,
}

impl GatedProcessor {
    pub fn new(name: impl Into<String>) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let processor = Self {
            name: name.into(),
            gate: Arc::clone(&gate),
        };
        (processor, gate)
    }
}

#[async_trait]
impl Processor<TestItem> for GatedProcessor {
    async fn execute(&self, ctx: ExecutionContext, input: Input<TestItem>, output: Output<TestItem>) {
        tokio::select! {
            _ = self.gate.notified() => {}
            _ = ctx.cancelled() => return,
        }
        drive(self, &ctx, input, output, |item| item).await
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

/// Forwards the first item it sees, then returns without draining its input.
pub struct FirstOnlyProcessor {
    name: String,
}

impl FirstOnlyProcessor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Processor<TestItem> for FirstOnlyProcessor {
    async fn execute(&self, _ctx: ExecutionContext, input: Input<TestItem>, output: Output<TestItem>) {
        if let Some(item) = input.recv().await {
            let _ = output.send(item).await;
        }
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}
