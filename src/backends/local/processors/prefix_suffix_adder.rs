// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use super::{leaf_config, run_text_leaf, string_option, Transformed};
use crate::engine::{ExecutionContext, Input, Output};
use crate::item::TextItem;
use crate::traits::{Processor, ProcessorConfig};

pub const PREFIX_SUFFIX_ADDER: &str = "prefix_suffix_adder";

/// Wraps each item's text in a prefix and/or suffix.
pub struct PrefixSuffixAdderProcessor {
    name: String,
    prefix: Option<String>,
    suffix: Option<String>,
}

impl PrefixSuffixAdderProcessor {
    pub fn new(name: impl Into<String>, prefix: Option<String>, suffix: Option<String>) -> Self {
        Self {
            name: name.into(),
            prefix,
            suffix,
        }
    }

    /// Reads `prefix` and `suffix`; at least one is required.
    pub fn from_config(name: impl Into<String>, cfg: &ProcessorConfig) -> Result<Self, String> {
        let prefix = string_option(cfg, "prefix")?;
        let suffix = string_option(cfg, "suffix")?;
        if prefix.is_none() && suffix.is_none() {
            return Err("prefix_suffix_adder needs a 'prefix' or a 'suffix'".to_string());
        }
        Ok(Self::new(name, prefix, suffix))
    }

    fn decorate(&self, text: &str) -> String {
        let mut result = String::new();
        if let Some(prefix) = &self.prefix {
            result.push_str(prefix);
        }
        result.push_str(text);
        if let Some(suffix) = &self.suffix {
            result.push_str(suffix);
        }
        result
    }
}

#[async_trait]
impl Processor<TextItem> for PrefixSuffixAdderProcessor {
    async fn execute(&self, ctx: ExecutionContext, input: Input<TextItem>, output: Output<TextItem>) {
        run_text_leaf(self, ctx, input, output, |item| {
            Ok(Transformed::one(item.derive(self.decorate(&item.text))))
        })
        .await
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn config(&self) -> Option<ProcessorConfig> {
        let options: Vec<_> = [("prefix", &self.prefix), ("suffix", &self.suffix)]
            .into_iter()
            .filter_map(|(key, value)| value.as_ref().map(|v| (key, serde_json::Value::from(v.as_str()))))
            .collect();
        Some(leaf_config(PREFIX_SUFFIX_ADDER, &options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decorate() {
        let cases = vec![
            (Some("["), Some("]"), "x", "[x]"),
            (Some(">> "), None, "x", ">> x"),
            (None, Some("!"), "x", "x!"),
        ];

        for (prefix, suffix, input, expected) in cases {
            let processor = PrefixSuffixAdderProcessor::new(
                "wrap",
                prefix.map(str::to_string),
                suffix.map(str::to_string),
            );
            assert_eq!(processor.decorate(input), expected);
        }
    }

    #[test]
    fn test_from_config_requires_an_option() {
        let mut cfg = ProcessorConfig::new();
        assert!(PrefixSuffixAdderProcessor::from_config("wrap", &cfg).is_err());

        cfg.insert("suffix".to_string(), serde_json::json!("!"));
        let processor = PrefixSuffixAdderProcessor::from_config("wrap", &cfg).unwrap();
        assert_eq!(processor.decorate("hey"), "hey!");

        let written = Processor::<TextItem>::config(&processor).unwrap();
        assert_eq!(written["suffix"], serde_json::json!("!"));
        assert!(!written.contains_key("prefix"));
    }
}
