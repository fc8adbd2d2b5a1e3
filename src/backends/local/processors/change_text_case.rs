// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{leaf_config, run_text_leaf, string_option, Transformed};
use crate::engine::{ExecutionContext, Input, Output};
use crate::item::TextItem;
use crate::traits::{Processor, ProcessorConfig};

pub const CHANGE_TEXT_CASE: &str = "change_text_case";

const SMALL_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextCase {
    Upper,
    Lower,
    /// First letter of every word capitalized.
    Proper,
    /// Like proper, but short articles and prepositions stay lower case after the first word.
    Title,
}

impl TextCase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextCase::Upper => "upper",
            TextCase::Lower => "lower",
            TextCase::Proper => "proper",
            TextCase::Title => "title",
        }
    }

    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "upper" => Ok(TextCase::Upper),
            "lower" => Ok(TextCase::Lower),
            "proper" => Ok(TextCase::Proper),
            "title" => Ok(TextCase::Title),
            other => Err(format!("unknown case type: {}", other)),
        }
    }

    pub fn apply(&self, text: &str) -> String {
        match self {
            TextCase::Upper => text.to_uppercase(),
            TextCase::Lower => text.to_lowercase(),
            TextCase::Proper => text
                .split_whitespace()
                .map(capitalize)
                .collect::<Vec<_>>()
                .join(" "),
            TextCase::Title => text
                .split_whitespace()
                .enumerate()
                .map(|(i, word)| {
                    let lower = word.to_lowercase();
                    if i > 0 && SMALL_WORDS.contains(&lower.as_str()) {
                        lower
                    } else {
                        capitalize(word)
                    }
                })
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    }
}

/// Converts each item's text to the configured case.
pub struct ChangeTextCaseProcessor {
    name: String,
    case: TextCase,
}

impl ChangeTextCaseProcessor {
    pub fn new(name: impl Into<String>, case: TextCase) -> Self {
        Self {
            name: name.into(),
            case,
        }
    }

    /// Reads the `case` option; upper case when absent.
    pub fn from_config(name: impl Into<String>, cfg: &ProcessorConfig) -> Result<Self, String> {
        let case = match string_option(cfg, "case")? {
            Some(value) => TextCase::parse(&value)?,
            None => TextCase::Upper,
        };
        Ok(Self::new(name, case))
    }

    pub fn case(&self) -> TextCase {
        self.case
    }
}

#[async_trait]
impl Processor<TextItem> for ChangeTextCaseProcessor {
    async fn execute(&self, ctx: ExecutionContext, input: Input<TextItem>, output: Output<TextItem>) {
        run_text_leaf(self, ctx, input, output, |item| {
            Ok(Transformed::one(item.derive(self.case.apply(&item.text))))
        })
        .await
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn config(&self) -> Option<ProcessorConfig> {
        Some(leaf_config(
            CHANGE_TEXT_CASE,
            &[("case", serde_json::Value::from(self.case.as_str()))],
        ))
    }
}
