// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while loading a pipeline config and building a processor tree.
//!
//! Construction is synchronous and fails fast: the first bad node aborts the
//! build. Once a tree is running there is no error path; leaves report item
//! failures through statistics and logging instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// A node could not be turned into a processor: unknown type, or the
    /// processor factory refused it.
    #[error("{name}: invalid pipeline type ({reason})")]
    InvalidPipelineType { name: String, reason: String },

    /// The config file could not be read.
    #[error("failed to read config '{}': {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file was read but is not a valid pipeline config.
    #[error("failed to parse config '{}': {reason}", .path.display())]
    ConfigParse { path: PathBuf, reason: String },

    /// A tree could not be written out.
    #[error("failed to serialize pipeline: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl PipelineError {
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        PipelineError::InvalidPipelineType {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
