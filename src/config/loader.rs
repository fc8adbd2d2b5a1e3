// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config::PipelineDescriptor;
use crate::engine::LogLevel;
use crate::errors::PipelineError;
use crate::observability::messages::{config::ConfigLoaded, StructuredLog};

/// A pipeline config file: run options plus the processor tree.
///
/// # Fields
/// * `options` - How the tree is run (optional, everything off by default)
/// * `pipeline` - The root node of the processor tree
///
/// # Example
/// ```yaml
/// options:
///   traces: true
///   log_level: debug
///   stats: true
/// pipeline:
///   type: sequential
///   name: main
///   processors:
///     - type: processor
///       name: shout
///       cfg:
///         impl: change_text_case
///         case: upper
///     - type: processor
///       name: reverse_text
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub options: RunOptions,
    pub pipeline: PipelineDescriptor,
}

/// Run options applied to the execution context.
///
/// # Fields
/// * `traces` - Stamp each output item with the stages it passed through
/// * `log_level` - `disabled` or `debug`; debug logs every stage start
/// * `stats` - Register a statistics store for the run
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RunOptions {
    #[serde(default)]
    pub traces: bool,
    #[serde(default)]
    pub log_level: LogLevel,
    #[serde(default)]
    pub stats: bool,
}

/// On-disk formats a config can be written in, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    /// `.json` and `.toml` by extension; anything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Yaml,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigFormat::Yaml => "yaml",
            ConfigFormat::Json => "json",
            ConfigFormat::Toml => "toml",
        }
    }

    pub fn parse(&self, content: &str) -> Result<Config, String> {
        match self {
            ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

/// Load a pipeline config from a YAML, JSON or TOML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, PipelineError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| PipelineError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    let format = ConfigFormat::from_path(path);
    let cfg = format
        .parse(&content)
        .map_err(|reason| PipelineError::ConfigParse {
            path: path.to_path_buf(),
            reason,
        })?;

    ConfigLoaded {
        path: &path.display().to_string(),
        format: format.as_str(),
    }
    .log();

    Ok(cfg)
}
