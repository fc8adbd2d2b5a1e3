// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod consts;
mod descriptor;
mod factory;
mod loader;
mod runtime;


pub use descriptor::PipelineDescriptor;
pub use factory::ProcessorFactory;
pub use loader::{load_config, Config, ConfigFormat, RunOptions};
pub use runtime::{Runtime, RuntimeBuilder};
