// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::traits::Traceable;

/// A line of text moving through a pipeline, with the stages it has passed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct TextItem {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trace: Vec<String>,
}

impl TextItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            trace: Vec::new(),
        }
    }

    /// A new item carrying `text` and this item's trace so far.
    pub fn derive(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            trace: self.trace.clone(),
        }
    }
}

impl Traceable for TextItem {
    fn add_trace(&mut self, stage: &str) {
        self.trace.push(stage.to_string());
    }
}

impl fmt::Display for TextItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.trace.is_empty() {
            write!(f, "{}", self.text)
        } else {
            write!(f, "{} [{}]", self.text, self.trace.join(" -> "))
        }
    }
}

impl From<&str> for TextItem {
    fn from(text: &str) -> Self {
        TextItem::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_and_without_trace() {
        let mut item = TextItem::new("hello");
        assert_eq!(item.to_string(), "hello");

        item.add_trace("upper");
        item.add_trace("Sequential/main");
        assert_eq!(item.to_string(), "hello [upper -> Sequential/main]");
    }

    #[test]
    fn test_derive_keeps_trace() {
        let mut item = TextItem::new("hello world");
        item.add_trace("Fanout/split");

        let word = item.derive("hello");
        assert_eq!(word.text, "hello");
        assert_eq!(word.trace, vec!["Fanout/split".to_string()]);
    }
}
